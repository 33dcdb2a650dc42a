use docbridge::id;
use tests::prelude::*;

fn driver() -> MockDriver {
    MockDriver::new().table("TestCollection", &["_id"])
}

#[tokio::test]
async fn get_by_key() {
    let driver = driver();
    let db = setup(&driver).await;

    driver.respond(vec![doc! { "_id" => "abc", "name" => "test" }]);

    let id = id::encode("lowla.TestCollection", doc! { "_id" => "abc" });
    let doc = assert_ok!(db.get_document(&id).await);
    assert_eq!(doc, doc! { "_id" => "abc", "name" => "test" });

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(
        op,
        "SELECT * FROM \"public\".\"TestCollection\" WHERE \"_id\" = $1"
    );
    assert_eq!(op.params, vec![Value::from("abc")]);
}

#[tokio::test]
async fn composite_key_filters_every_column() {
    let driver = MockDriver::new().table("TestCollection", &["pk_one", "pk_two"]);
    let db = setup(&driver).await;

    driver.respond(vec![doc! { "pk_one" => "pk1", "pk_two" => 2 }]);

    // {"pk_one":"pk1","pk_two":2}
    let id = "lowla.TestCollection#eyJwa19vbmUiOiJwazEiLCJwa190d28iOjJ9";
    assert_ok!(db.get_document(id).await);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(
        op,
        "SELECT * FROM \"public\".\"TestCollection\" WHERE \"pk_one\" = $1 AND \"pk_two\" = $2"
    );
    assert_eq!(op.params, vec![Value::from("pk1"), Value::from(2)]);
}

#[tokio::test]
async fn missing_document() {
    let driver = driver();
    let db = setup(&driver).await;

    let id = id::encode("lowla.TestCollection", "gone");
    let err = assert_err!(db.get_document(&id).await);

    assert!(err.is_document_not_found());
    assert_eq!(err.to_string(), format!("document not found: {id}"));
}

#[tokio::test]
async fn malformed_identifier_issues_no_statement() {
    let driver = driver();
    let db = setup(&driver).await;

    for id in ["lowla.TestCollection", "TestCollection#e30=", "lowla.TestCollection#!!"] {
        let err = assert_err!(db.get_document(id).await);
        assert!(err.is_malformed_identifier(), "{id}: {err}");
    }

    assert!(driver.exec_log().is_empty());
}

#[tokio::test]
async fn driver_failures_propagate() {
    let driver = driver();
    let db = setup(&driver).await;

    driver.fail(docbridge_core::err!("connection reset"));

    let id = id::encode("lowla.TestCollection", "abc");
    let err = assert_err!(db.get_document(&id).await);
    assert_eq!(err.to_string(), "connection reset");
}
