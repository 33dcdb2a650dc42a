use crate::{
    async_trait,
    stmt::{Document, RowStream, Value},
};

use std::fmt::Debug;

/// The query-executing backend.
///
/// A driver executes parameterized SQL text whose placeholders (`$1`, `$2`,
/// ...) index into `params`. Implementations own their connection handling;
/// docbridge issues one statement per call and never retries, so any
/// pooling, timeout or cancellation policy lives here.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Executes a statement and returns every row it produced.
    ///
    /// Statements without a result set return an empty list; data-modifying
    /// statements are expected to carry a `RETURNING` clause when the caller
    /// needs to know which rows they touched.
    async fn query(&self, sql: &str, params: &[Value]) -> crate::Result<Vec<Document>>;

    /// Executes a statement and returns its rows as a stream.
    ///
    /// Rows must be yielded incrementally; the full result set must not be
    /// buffered in memory.
    async fn query_stream(&self, sql: &str, params: &[Value]) -> crate::Result<RowStream>;
}
