use super::{Assignments, Expr, TableRef};

/// `UPDATE <table> SET ... [WHERE <filter>] RETURNING *`
#[derive(Debug, Clone)]
pub struct Update {
    pub table: TableRef,
    pub assignments: Assignments,
    pub filter: Option<Expr>,
}

impl Update {
    pub fn new(table: TableRef, assignments: Assignments, filter: Option<Expr>) -> Self {
        Self {
            table,
            assignments,
            filter,
        }
    }
}
