mod builder;
pub use builder::Builder;

mod options;
pub use options::Options;

mod stream;
pub use stream::{RowHandler, StreamSummary};

use crate::{exec, query, schema::Catalog, upsert, DocumentId, Operations};

use docbridge_core::{driver::Driver, Document, Error, Result, Value};
use docbridge_sql::stmt::{Delete, Expr, Insert, Select, Update};

use std::sync::Arc;

/// The document engine.
///
/// Holds the driver and immutable configuration only. Table descriptors are
/// read from the catalog on every call, so concurrent calls never share
/// mutable state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Arc<dyn Driver>,
    catalog: Catalog,

    /// Database part of every identifier namespace
    database: String,

    version_column: String,
}

/// A document as stored after an update, with its current identifier.
///
/// `id` differs from the identifier passed in when the update changed a
/// primary-key column.
#[derive(Debug, Clone, PartialEq)]
pub struct Updated {
    pub id: String,
    pub document: Document,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects to a `postgresql://` URL with default options.
    #[cfg(feature = "postgresql")]
    pub async fn connect(url: &str) -> Result<Db> {
        Self::builder().connect(url).await
    }

    /// Name of the database, as used in identifier namespaces.
    pub fn database(&self) -> &str {
        &self.shared.database
    }

    pub fn catalog(&self) -> &Catalog {
        &self.shared.catalog
    }

    fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Fetches one document.
    ///
    /// Fails with [`Error::document_not_found`] when no row has the
    /// identifier's key.
    pub async fn get_document(&self, id: &str) -> Result<Document> {
        let doc_id = DocumentId::parse(id)?;
        let key = doc_id.key()?;
        let table = self.catalog().table(&doc_id.collection).await?;

        let filter = Expr::and_from_vec(table.key_filter(key));
        let mut rows = exec::query(self.driver(), Select::new(table.table_ref(), filter)).await?;

        if rows.is_empty() {
            return Err(Error::document_not_found(id));
        }

        Ok(rows.swap_remove(0))
    }

    /// Applies update operations to a document.
    ///
    /// - Without a `previous_version` (or with a null one) the document is
    ///   upserted. Nothing guards against overwriting a concurrently created
    ///   document.
    /// - With version `0` the document is new and is inserted.
    /// - Otherwise the row is updated only if its version column still holds
    ///   `previous_version`; a mismatch or a missing row fails with
    ///   [`Error::conflict`].
    pub async fn update_document(
        &self,
        id: &str,
        previous_version: Option<Value>,
        ops: &Operations,
    ) -> Result<Updated> {
        // Clients may send provisional identifiers for new documents
        let doc_id = DocumentId::parse_lenient(id)?;
        let mut table = self.catalog().table(&doc_id.collection).await?;

        let row = match previous_version {
            None | Some(Value::Null) => {
                tracing::debug!(id, "no previous version; upserting");

                let mut ops = ops.clone();
                ops.set_missing(doc_id.key()?);

                let stmt = upsert::statement(table.table_ref(), &ops, table.primary_key())?;
                let mut rows = exec::query(self.driver(), stmt).await?;

                if rows.len() != 1 {
                    tracing::warn!(
                        id,
                        rows = rows.len(),
                        "upsert did not modify exactly one row"
                    );
                    return Err(Error::conflict(format!(
                        "upsert of {} returned {} rows, expected 1",
                        doc_id.namespace(),
                        rows.len()
                    )));
                }

                rows.swap_remove(0)
            }
            Some(version) if version.is_zero() => {
                let assignments = ops.compile(&mut table, true);
                let mut rows =
                    exec::query(self.driver(), Insert::new(table.table_ref(), assignments)).await?;

                if rows.is_empty() {
                    return Err(Error::conflict(format!(
                        "insert into {} returned no rows",
                        table.name
                    )));
                }

                rows.swap_remove(0)
            }
            Some(version) => {
                let key = doc_id.key()?;
                let assignments = ops.compile(&mut table, false);
                table.add_column(&self.shared.version_column);

                let mut filter = table.key_filter(key);
                filter.push(Expr::column_eq(&self.shared.version_column, version));
                let filter = Expr::and_from_vec(filter);

                let mut rows = if assignments.is_empty() {
                    // Nothing to write; still report whether the version matches
                    exec::query(self.driver(), Select::new(table.table_ref(), filter)).await?
                } else {
                    exec::query(
                        self.driver(),
                        Update::new(table.table_ref(), assignments, filter),
                    )
                    .await?
                };

                if rows.is_empty() {
                    return Err(Error::conflict(format!(
                        "no row of {} matched {id} at the expected version",
                        table.name
                    )));
                }

                rows.swap_remove(0)
            }
        };

        let key = if table.primary_key().is_empty() {
            doc_id.key.clone().unwrap_or_default()
        } else {
            table.key_of(&row)
        };

        if doc_id.key.as_ref() != Some(&key) {
            tracing::info!(id, ?key, "document identifier changed");
        }

        Ok(Updated {
            id: crate::id::encode(&doc_id.namespace(), key),
            document: row,
        })
    }

    /// Deletes a document.
    ///
    /// With a `previous_version` the row is deleted only at that version.
    /// Fails with [`Error::conflict`] when no row was deleted, which usually
    /// means it was already gone.
    pub async fn remove_document(&self, id: &str, previous_version: Option<Value>) -> Result<()> {
        let doc_id = DocumentId::parse(id)?;
        let key = doc_id.key()?;
        let mut table = self.catalog().table(&doc_id.collection).await?;

        let mut filter = table.key_filter(key);
        if let Some(version) = previous_version.filter(|v| !v.is_null()) {
            table.add_column(&self.shared.version_column);
            filter.push(Expr::column_eq(&self.shared.version_column, version));
        }

        let rows = exec::query(
            self.driver(),
            Delete::new(table.table_ref(), Expr::and_from_vec(filter)),
        )
        .await?;

        if rows.is_empty() {
            return Err(Error::conflict(format!("{id} was not deleted")));
        }

        Ok(())
    }

    /// Finds the rows of a collection matching a query document.
    ///
    /// A leading `<database>.` segment of `namespace` is ignored.
    pub async fn find_all(&self, namespace: &str, query: &Document) -> Result<Vec<Document>> {
        let collection = match namespace.split_once('.') {
            Some((_, collection)) => collection,
            None => namespace,
        };

        let mut table = self.catalog().table(collection).await?;
        let filter = Expr::and_from_vec(query::translate(&mut table, query)?);

        exec::query(self.driver(), Select::new(table.table_ref(), filter)).await
    }

    /// Streams every row of every table of the default schema to `handler`.
    ///
    /// Tables are exported concurrently, each with a single streaming query.
    /// The first failing table fails the whole export.
    pub async fn stream_all_documents<H: RowHandler>(
        &self,
        handler: &H,
    ) -> Result<Vec<StreamSummary>> {
        let names = self.catalog().table_names().await?;

        futures::future::try_join_all(
            names
                .into_iter()
                .map(|name| self.stream_table(name.table, handler)),
        )
        .await
    }

    async fn stream_table<H: RowHandler>(
        &self,
        collection: String,
        handler: &H,
    ) -> Result<StreamSummary> {
        let table = self.catalog().table(&collection).await?;
        let namespace = format!("{}.{}", self.shared.database, collection);

        let mut rows = exec::query_stream(self.driver(), Select::all(table.table_ref())).await?;
        let mut rows_sent = 0;

        while let Some(row) = rows.next().await {
            let row = row?;
            let id = crate::id::encode(&namespace, table.key_of(&row));
            let version = row.get(&self.shared.version_column);

            handler.write(&id, version, false, &row).await?;
            rows_sent += 1;
        }

        tracing::debug!(%namespace, rows_sent, "table exported");

        Ok(StreamSummary {
            namespace,
            rows_sent,
        })
    }
}
