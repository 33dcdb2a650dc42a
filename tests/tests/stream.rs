use docbridge::{async_trait, DocumentId, RowHandler, StreamSummary};
use tests::prelude::*;

use std::sync::Mutex;

#[derive(Debug, Default)]
struct Collect {
    writes: Mutex<Vec<(String, Option<Value>, bool, Document)>>,
}

#[async_trait]
impl RowHandler for Collect {
    async fn write(
        &self,
        id: &str,
        version: Option<&Value>,
        deleted: bool,
        row: &Document,
    ) -> docbridge::Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((id.to_string(), version.cloned(), deleted, row.clone()));
        Ok(())
    }
}

/// Fails on the first row it sees.
struct Reject;

#[async_trait]
impl RowHandler for Reject {
    async fn write(&self, id: &str, _: Option<&Value>, _: bool, _: &Document) -> docbridge::Result<()> {
        docbridge_core::bail!("rejected {id}")
    }
}

fn rows(n: i64) -> Vec<Document> {
    (0..n)
        .map(|i| doc! { "_id" => format!("row{i}"), "n" => i, "_version" => 1 })
        .collect()
}

#[tokio::test]
async fn every_row_of_every_table() {
    let driver = MockDriver::new()
        .table("a", &["_id"])
        .rows("a", rows(10))
        .table("b", &["_id"])
        .rows("b", rows(10))
        .table("c", &["_id"])
        .rows("c", rows(10));
    let db = setup(&driver).await;

    let handler = Collect::default();
    let summaries = assert_ok!(db.stream_all_documents(&handler).await);

    assert_eq!(
        summaries,
        ["a", "b", "c"].map(|table| StreamSummary {
            namespace: format!("lowla.{table}"),
            rows_sent: 10,
        })
    );

    let writes = handler.writes.into_inner().unwrap();
    assert_eq!(writes.len(), 30);

    for (id, version, deleted, row) in &writes {
        let id = assert_ok!(DocumentId::parse(id));
        assert_eq!(id.database, "lowla");
        assert_eq!(id.key, Some(doc! { "_id" => row["_id"].clone() }));
        assert_eq!(version.as_ref(), Some(&Value::from(1)));
        assert!(!deleted);
    }

    // One streaming query per table
    let log = driver.exec_log();
    assert_eq!(log.count(|op| op.streamed), 3);
    assert_eq!(log.count(|op| op.streamed && op.sql.contains("WHERE")), 0);
}

#[tokio::test]
async fn empty_schema_streams_nothing() {
    let driver = MockDriver::new();
    let db = setup(&driver).await;

    let handler = Collect::default();
    let summaries = assert_ok!(db.stream_all_documents(&handler).await);

    assert!(summaries.is_empty());
    assert!(handler.writes.into_inner().unwrap().is_empty());
}

#[tokio::test]
async fn rows_without_version_column() {
    let driver = MockDriver::new()
        .table("a", &["_id"])
        .rows("a", vec![doc! { "_id" => 1 }]);
    let db = setup(&driver).await;

    let handler = Collect::default();
    assert_ok!(db.stream_all_documents(&handler).await);

    let writes = handler.writes.into_inner().unwrap();
    assert_eq!(writes[0].1, None);
}

#[tokio::test]
async fn handler_failure_aborts_export() {
    let driver = MockDriver::new()
        .table("a", &["_id"])
        .rows("a", rows(3));
    let db = setup(&driver).await;

    let err = assert_err!(db.stream_all_documents(&Reject).await);
    assert!(err.to_string().starts_with("rejected lowla.a#"), "{err}");
}
