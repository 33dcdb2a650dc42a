pub use crate::{assert_err, assert_ok, assert_sql, setup, DriverOp, MockDriver, DATABASE};

pub use docbridge::{doc, Db, Document, Error, Operations, Value};
