//! Catalog lookups against `pg_catalog`.

/// A query against the system catalog.
#[derive(Debug, Clone)]
pub enum Catalog {
    /// Name of the connected database, as column `current_database`.
    CurrentDatabase,

    /// Primary-key columns of a table in constraint order, as columns
    /// `name` and `type`.
    PrimaryKeys { schema: String, table: String },

    /// Tables of a schema, as columns `schemaname` and `tablename`.
    TableNames { schema: String },
}

impl Catalog {
    pub fn primary_keys(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self::PrimaryKeys {
            schema: schema.into(),
            table: table.into(),
        }
    }

    pub fn table_names(schema: impl Into<String>) -> Self {
        Self::TableNames {
            schema: schema.into(),
        }
    }
}
