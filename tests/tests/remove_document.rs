use docbridge::id;
use tests::prelude::*;

fn driver() -> MockDriver {
    MockDriver::new().table("TestCollection", &["_id"])
}

#[tokio::test]
async fn remove_by_key() {
    let driver = driver();
    let db = setup(&driver).await;

    driver.respond(vec![doc! { "_id" => "abc" }]);

    let id = id::encode("lowla.TestCollection", "abc");
    assert_ok!(db.remove_document(&id, None).await);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(
        op,
        "DELETE FROM \"public\".\"TestCollection\" WHERE \"_id\" = $1 RETURNING *"
    );
    assert_eq!(op.params, vec![Value::from("abc")]);
}

#[tokio::test]
async fn remove_twice_conflicts() {
    let driver = driver();
    let db = setup(&driver).await;

    driver.respond(vec![doc! { "_id" => "abc" }]);

    let id = id::encode("lowla.TestCollection", "abc");
    assert_ok!(db.remove_document(&id, None).await);

    let err = assert_err!(db.remove_document(&id, None).await);
    assert!(err.is_conflict());
}

#[tokio::test]
async fn remove_at_version() {
    let driver = driver();
    let db = setup(&driver).await;

    driver.respond(vec![doc! { "_id" => "abc" }]);
    driver.respond(vec![doc! { "_id" => "abc" }]);

    let id = id::encode("lowla.TestCollection", "abc");
    assert_ok!(db.remove_document(&id, Some(Value::from(5))).await);
    assert_ok!(db.remove_document(&id, Some(Value::Null)).await);

    let log = driver.exec_log();

    let op = log.pop().unwrap();
    assert_sql!(
        op,
        "DELETE FROM \"public\".\"TestCollection\" WHERE \"_id\" = $1 AND \"_version\" = $2 RETURNING *"
    );
    assert_eq!(op.params, vec![Value::from("abc"), Value::from(5)]);

    // A null version does not constrain the delete
    let op = log.pop().unwrap();
    assert_eq!(op.params, vec![Value::from("abc")]);
}

#[tokio::test]
async fn remove_requires_decodable_key() {
    let driver = driver();
    let db = setup(&driver).await;

    let err = assert_err!(
        db.remove_document("lowla.TestCollection#provisional!", None)
            .await
    );
    assert!(err.is_malformed_identifier());
}
