use super::{Expr, TableRef};

/// `DELETE FROM <table> [WHERE <filter>] RETURNING *`
#[derive(Debug, Clone)]
pub struct Delete {
    pub table: TableRef,
    pub filter: Option<Expr>,
}

impl Delete {
    pub fn new(table: TableRef, filter: Option<Expr>) -> Self {
        Self { table, filter }
    }
}
