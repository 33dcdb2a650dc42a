use super::{Assignments, TableRef};

/// `INSERT INTO <table> (...) VALUES (...) RETURNING *`
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: TableRef,
    pub assignments: Assignments,
}

impl Insert {
    pub fn new(table: TableRef, assignments: Assignments) -> Self {
        Self { table, assignments }
    }
}
