use docbridge_core::{driver::Driver, stmt::RowStream, Document, Result};
use docbridge_sql::{Serializer, Statement};

/// Renders `stmt` and runs it, returning every row.
pub(crate) async fn query(driver: &dyn Driver, stmt: impl Into<Statement>) -> Result<Vec<Document>> {
    let (sql, params) = serialize(&stmt.into());
    driver.query(&sql, &params).await
}

/// Renders `stmt` and runs it as a stream.
pub(crate) async fn query_stream(
    driver: &dyn Driver,
    stmt: impl Into<Statement>,
) -> Result<RowStream> {
    let (sql, params) = serialize(&stmt.into());
    driver.query_stream(&sql, &params).await
}

fn serialize(stmt: &Statement) -> (String, Vec<docbridge_core::Value>) {
    let mut params = Vec::new();
    let sql = Serializer::postgresql().serialize(stmt, &mut params);

    tracing::debug!(
        %sql,
        params = params.len(),
        mutation = stmt.is_mutation(),
        "issuing statement"
    );

    (sql, params)
}
