use docbridge_core::{async_trait, Document, Result, Value};

/// Receives the rows of a bulk export.
///
/// `write` is awaited before the next row is pulled from the database, so a
/// slow handler slows the export down instead of buffering rows.
#[async_trait]
pub trait RowHandler: Send + Sync {
    /// Called once per row. `version` is the row's version column, if it
    /// has one. `deleted` is always `false` for rows read from a table.
    async fn write(
        &self,
        id: &str,
        version: Option<&Value>,
        deleted: bool,
        row: &Document,
    ) -> Result<()>;
}

/// Outcome of exporting one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    /// `<database>.<table>`
    pub namespace: String,

    /// Rows handed to the handler
    pub rows_sent: usize,
}
