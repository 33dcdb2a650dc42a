use docbridge_core::{Error, Result};
use docbridge_sql::stmt::TableRef;

use std::fmt;

/// A schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub schema: String,
    pub table: String,
}

impl TableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Resolves a collection name to a table.
    ///
    /// `schema.table` names the schema explicitly; a bare name lives in
    /// `default_schema`. More than one `.` is rejected.
    pub fn resolve(collection: &str, default_schema: &str) -> Result<Self> {
        match collection.split_once('.') {
            None => Ok(Self::new(default_schema, collection)),
            Some((schema, table)) if !table.contains('.') => Ok(Self::new(schema, table)),
            Some(_) => Err(Error::invalid_table_identifier(collection)),
        }
    }

    pub fn to_table_ref(&self) -> TableRef {
        TableRef::new(&self.schema, &self.table)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}
