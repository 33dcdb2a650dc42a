use docbridge_core::Value;

use std::sync::{Arc, Mutex};

/// One statement issued through the mock driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOp {
    pub sql: String,
    pub params: Vec<Value>,

    /// Issued through `query_stream` instead of `query`
    pub streamed: bool,
}

impl DriverOp {
    pub fn is_catalog(&self) -> bool {
        self.sql.contains("pg_catalog") || self.sql.contains("current_database()")
    }
}

/// A handle on the statements issued through a [`MockDriver`](crate::MockDriver).
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count statements matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DriverOp) -> bool,
    {
        self.ops.lock().unwrap().iter().filter(|op| predicate(op)).count()
    }

    /// Statements that did not read the catalog, in issue order
    pub fn data_ops(&self) -> Vec<DriverOp> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| !op.is_catalog())
            .cloned()
            .collect()
    }

    /// Remove and return the first non-catalog statement from the log.
    /// Catalog reads before it are dropped.
    pub fn pop(&self) -> Option<DriverOp> {
        let mut ops = self.ops.lock().unwrap();

        while !ops.is_empty() {
            let op = ops.remove(0);
            if !op.is_catalog() {
                return Some(op);
            }
        }

        None
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }
}
