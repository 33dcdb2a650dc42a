use super::{Column, Table, TableName};
use crate::exec;

use docbridge_core::{driver::Driver, Document, Error, Result};
use docbridge_sql::stmt;

use std::sync::Arc;

/// Reads table metadata from the database catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    driver: Arc<dyn Driver>,

    /// Schema of collections named without one
    default_schema: String,
}

impl Catalog {
    pub fn new(driver: Arc<dyn Driver>, default_schema: impl Into<String>) -> Self {
        Self {
            driver,
            default_schema: default_schema.into(),
        }
    }

    pub fn default_schema(&self) -> &str {
        &self.default_schema
    }

    /// Resolves a collection name against the default schema.
    pub fn resolve(&self, collection: &str) -> Result<TableName> {
        TableName::resolve(collection, &self.default_schema)
    }

    /// Primary-key columns of a table, in constraint order.
    pub async fn primary_keys(&self, name: &TableName) -> Result<Vec<Column>> {
        let rows = exec::query(
            &*self.driver,
            stmt::Catalog::primary_keys(&name.schema, &name.table),
        )
        .await
        .map_err(|err| err.context(Error::metadata_fetch_failed(name.to_string())))?;

        rows.iter()
            .map(|row| {
                Ok(Column {
                    name: text(row, "name")?.to_string(),
                    ty: row.get("type").and_then(|ty| ty.as_str()).map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|err| err.context(Error::metadata_fetch_failed(name.to_string())))
    }

    /// Looks up the descriptor of a collection. Known columns are seeded
    /// from the primary key.
    pub async fn table(&self, collection: &str) -> Result<Table> {
        let name = self.resolve(collection)?;
        let primary_key = self.primary_keys(&name).await?;

        if primary_key.is_empty() {
            tracing::debug!(table = %name, "table has no primary key");
        }

        Ok(Table::new(name, primary_key))
    }

    /// Every table of the default schema.
    pub async fn table_names(&self) -> Result<Vec<TableName>> {
        let rows = exec::query(
            &*self.driver,
            stmt::Catalog::table_names(&self.default_schema),
        )
        .await
        .map_err(|err| err.context(Error::metadata_fetch_failed(format!("{}.*", self.default_schema))))?;

        rows.iter()
            .map(|row| {
                Ok(TableName::new(
                    text(row, "schemaname")?,
                    text(row, "tablename")?,
                ))
            })
            .collect()
    }

    /// Name of the database the driver is connected to.
    pub async fn current_database(&self) -> Result<String> {
        let rows = exec::query(&*self.driver, stmt::Catalog::CurrentDatabase).await?;

        match rows.first() {
            Some(row) => Ok(text(row, "current_database")?.to_string()),
            None => docbridge_core::bail!("current_database() returned no rows"),
        }
    }
}

fn text<'a>(row: &'a Document, column: &str) -> Result<&'a str> {
    match row.get(column) {
        Some(value) => value.as_str().ok_or_else(|| {
            docbridge_core::err!(
                "catalog column `{column}` is a {}, expected a string",
                value.kind_name()
            )
        }),
        None => docbridge_core::bail!("catalog row is missing column `{column}`"),
    }
}
