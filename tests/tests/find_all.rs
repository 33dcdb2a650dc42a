use tests::prelude::*;

fn driver() -> MockDriver {
    MockDriver::new().table("TestCollection", &["_id"])
}

#[tokio::test]
async fn comparison_and_equality() {
    let driver = driver();
    let db = setup(&driver).await;

    let rows = vec![
        doc! { "_id" => "a", "a" => 5, "b" => "x" },
        doc! { "_id" => "b", "a" => 9, "b" => "x" },
    ];
    driver.respond(rows.clone());

    let query = doc! { "a" => doc! { "$gte" => 5 }, "b" => "x" };
    let found = assert_ok!(db.find_all("lowla.TestCollection", &query).await);
    assert_eq!(found, rows);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(
        op,
        "SELECT * FROM \"public\".\"TestCollection\" WHERE \"a\" >= $1 AND \"b\" = $2"
    );
    assert_eq!(op.params, vec![Value::from(5), Value::from("x")]);
}

#[tokio::test]
async fn empty_query_selects_everything() {
    let driver = driver();
    let db = setup(&driver).await;

    assert_ok!(db.find_all("lowla.TestCollection", &doc! {}).await);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(op, "SELECT * FROM \"public\".\"TestCollection\"");
    assert!(op.params.is_empty());
}

#[tokio::test]
async fn null_matches_missing_values() {
    let driver = driver();
    let db = setup(&driver).await;

    let query = doc! { "deleted_at" => Value::Null, "n" => doc! { "$lt" => 3 } };
    assert_ok!(db.find_all("lowla.TestCollection", &query).await);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(
        op,
        "SELECT * FROM \"public\".\"TestCollection\" WHERE \"deleted_at\" IS NULL AND \"n\" < $1"
    );
}

#[tokio::test]
async fn unsupported_operator_issues_no_query() {
    let driver = driver();
    let db = setup(&driver).await;

    let query = doc! { "a" => doc! { "$ne" => 1 } };
    let err = assert_err!(db.find_all("lowla.TestCollection", &query).await);

    assert!(err.is_unsupported_operator());
    assert_eq!(err.to_string(), "unsupported operator `$ne` in field `a`");
    assert!(driver.exec_log().data_ops().is_empty());
}

#[tokio::test]
async fn ordering_against_null_issues_no_query() {
    let driver = driver();
    let db = setup(&driver).await;

    let query = doc! { "a" => doc! { "$gt" => Value::Null } };
    let err = assert_err!(db.find_all("lowla.TestCollection", &query).await);

    assert_eq!(
        err.to_string(),
        "operator `$gt` in field `a` cannot compare against null"
    );
    assert!(driver.exec_log().data_ops().is_empty());
}

#[tokio::test]
async fn namespace_database_is_optional() {
    let driver = driver();
    let db = setup(&driver).await;

    assert_ok!(db.find_all("TestCollection", &doc! { "a" => 1 }).await);
    assert_ok!(db.find_all("otherdb.TestCollection", &doc! { "a" => 1 }).await);

    let log = driver.exec_log();
    for _ in 0..2 {
        let op = log.pop().unwrap();
        assert_sql!(
            op,
            "SELECT * FROM \"public\".\"TestCollection\" WHERE \"a\" = $1"
        );
    }
}

#[tokio::test]
async fn schema_qualified_collection() {
    let driver = driver();
    let db = setup(&driver).await;

    assert_ok!(db.find_all("lowla.app.items", &doc! {}).await);

    let op = driver.exec_log().pop().unwrap();
    assert_sql!(op, "SELECT * FROM \"app\".\"items\"");

    let err = assert_err!(db.find_all("lowla.a.b.c", &doc! {}).await);
    assert!(err.is_invalid_table_identifier());
}
