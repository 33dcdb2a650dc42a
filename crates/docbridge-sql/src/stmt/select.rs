use super::{Expr, TableRef};

/// `SELECT * FROM <table> [WHERE <filter>]`
#[derive(Debug, Clone)]
pub struct Select {
    pub table: TableRef,
    pub filter: Option<Expr>,
}

impl Select {
    pub fn new(table: TableRef, filter: Option<Expr>) -> Self {
        Self { table, filter }
    }

    /// Selects every row of the table.
    pub fn all(table: TableRef) -> Self {
        Self::new(table, None)
    }
}
