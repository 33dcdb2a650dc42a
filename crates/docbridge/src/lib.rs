pub mod codec;

pub mod db;
pub use db::{Db, Options, RowHandler, StreamSummary, Updated};

mod exec;

pub mod id;
pub use id::DocumentId;

pub mod ops;
pub use ops::Operations;

pub mod query;

pub mod schema;

pub mod upsert;

pub use docbridge_core::{async_trait, doc, driver::Driver, Document, Error, Result, Value};
