#![cfg(feature = "postgresql")]

use docbridge::{async_trait, id, RowHandler};
use tests::{prelude::*, TestIsolation};

use std::sync::Mutex;
use tokio_postgres::NoTls;

fn url() -> Option<String> {
    std::env::var("DOCBRIDGE_TEST_POSTGRES_URL").ok()
}

/// A table owned by one test, dropped when the test is done.
struct Fixture {
    client: tokio_postgres::Client,
    table: String,
}

impl Fixture {
    async fn new(url: &str) -> Fixture {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .expect("Failed to connect to PostgreSQL");

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        let table = TestIsolation::new().table("items");
        client
            .batch_execute(&format!(
                "CREATE TABLE \"{table}\" (
                    _id text PRIMARY KEY,
                    name text,
                    count bigint,
                    _version bigint NOT NULL DEFAULT 1
                )"
            ))
            .await
            .expect("Failed to create table");

        Fixture { client, table }
    }

    async fn cleanup(self) {
        self.client
            .batch_execute(&format!("DROP TABLE IF EXISTS \"{}\" CASCADE", self.table))
            .await
            .expect("Failed to drop table");
    }
}

#[derive(Default)]
struct Count {
    ids: Mutex<Vec<String>>,
}

#[async_trait]
impl RowHandler for Count {
    async fn write(&self, id: &str, _: Option<&Value>, _: bool, _: &Document) -> docbridge::Result<()> {
        self.ids.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn document_lifecycle() {
    let Some(url) = url() else {
        eprintln!("DOCBRIDGE_TEST_POSTGRES_URL not set; skipping");
        return;
    };
    tests::init_logging();

    let fixture = Fixture::new(&url).await;
    let db = assert_ok!(Db::connect(&url).await);
    let namespace = format!("{}.{}", db.database(), fixture.table);
    let id = id::encode(&namespace, "abc");

    // Upsert creates the row
    let ops = Operations::new().set("name", "test").inc("count", 2);
    let updated = assert_ok!(db.update_document(&id, None, &ops).await);
    assert_eq!(updated.id, id);
    assert_eq!(updated.document["count"], Value::from(2));

    // ... and updates it the second time
    let updated = assert_ok!(db.update_document(&id, None, &ops).await);
    assert_eq!(updated.document["name"], Value::from("test"));
    assert_eq!(updated.document["count"], Value::from(4));

    let doc = assert_ok!(db.get_document(&id).await);
    assert_eq!(doc["_version"], Value::from(1));

    // Versioned updates
    let ops = Operations::new().inc("count", 1);
    let updated = assert_ok!(db.update_document(&id, Some(Value::from(1)), &ops).await);
    assert_eq!(updated.document["count"], Value::from(5));

    let err = assert_err!(db.update_document(&id, Some(Value::from(9)), &ops).await);
    assert!(err.is_conflict());

    // Queries
    let found = assert_ok!(
        db.find_all(&namespace, &doc! { "count" => doc! { "$gte" => 5 } })
            .await
    );
    assert_eq!(found.len(), 1);

    let found = assert_ok!(
        db.find_all(&namespace, &doc! { "count" => doc! { "$gt" => 5 } })
            .await
    );
    assert!(found.is_empty());

    // Export
    let handler = Count::default();
    let summaries = assert_ok!(db.stream_all_documents(&handler).await);
    let summary = summaries
        .iter()
        .find(|summary| summary.namespace == namespace)
        .unwrap();
    assert_eq!(summary.rows_sent, 1);
    assert!(handler.ids.lock().unwrap().contains(&id));

    // Removal
    assert_ok!(db.remove_document(&id, Some(Value::from(1))).await);
    let err = assert_err!(db.remove_document(&id, None).await);
    assert!(err.is_conflict());

    let err = assert_err!(db.get_document(&id).await);
    assert!(err.is_document_not_found());

    fixture.cleanup().await;
}

#[tokio::test]
async fn new_document_insert() {
    let Some(url) = url() else {
        eprintln!("DOCBRIDGE_TEST_POSTGRES_URL not set; skipping");
        return;
    };
    tests::init_logging();

    let fixture = Fixture::new(&url).await;
    let db = assert_ok!(Db::connect(&url).await);
    let namespace = format!("{}.{}", db.database(), fixture.table);

    let ops = Operations::new().set("_id", "fresh").set("name", "new");
    let provisional = format!("{namespace}#provisional!");
    let updated = assert_ok!(
        db.update_document(&provisional, Some(Value::from(0)), &ops)
            .await
    );
    assert_eq!(updated.id, id::encode(&namespace, "fresh"));

    // Inserting the same key again is a database error, not a conflict
    let err = assert_err!(
        db.update_document(&provisional, Some(Value::from(0)), &ops)
            .await
    );
    assert!(!err.is_conflict());

    fixture.cleanup().await;
}
