use super::{Column, TableName};

use docbridge_core::Document;
use docbridge_sql::stmt::{Expr, TableRef};

use indexmap::IndexMap;

/// Describes one table for the duration of a request.
///
/// Known columns start out as the primary-key columns and grow as documents
/// and queries reference new fields. Widening never issues DDL; the columns
/// are assumed to exist in the database.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: TableName,

    /// Known columns, in discovery order
    columns: IndexMap<String, Column>,

    /// Primary-key column names in constraint order
    primary_key: Vec<String>,
}

impl Table {
    /// Creates a descriptor whose known columns are the primary-key columns.
    pub fn new(name: TableName, primary_key: Vec<Column>) -> Self {
        let primary_key_names = primary_key.iter().map(|c| c.name.clone()).collect();
        let columns = primary_key
            .into_iter()
            .map(|column| (column.name.clone(), column))
            .collect();

        Self {
            name,
            columns,
            primary_key: primary_key_names,
        }
    }

    pub fn table_ref(&self) -> TableRef {
        self.name.to_table_ref()
    }

    /// Primary-key column names in constraint order.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    /// Adds `name` to the known columns. Only the descriptor changes; the
    /// database table is never altered. Returns `true` if it was not known
    /// yet.
    pub fn add_column(&mut self, name: &str) -> bool {
        if self.columns.contains_key(name) {
            return false;
        }

        tracing::trace!(table = %self.name, column = name, "widening table");
        self.columns
            .insert(name.to_string(), Column::untyped(name));
        true
    }

    /// Adds every field of `fields` that is not a known column yet.
    pub fn add_columns<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            self.add_column(field);
        }
    }

    /// Extracts the primary-key tuple of a row. Key columns missing from the
    /// row map to null.
    pub fn key_of(&self, row: &Document) -> Document {
        self.primary_key
            .iter()
            .map(|name| (name.as_str(), row.get(name).cloned().unwrap_or_default()))
            .collect()
    }

    /// `"k1" = $1 AND "k2" = $2 ...` for each field of a key tuple.
    pub fn key_filter(&self, key: &Document) -> Vec<Expr> {
        key.iter()
            .map(|(name, value)| Expr::column_eq(name, value.clone()))
            .collect()
    }
}
