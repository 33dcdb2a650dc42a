//! Single round-trip insert-or-update.
//!
//! See [`docbridge_sql::stmt::Upsert`] for the shape of the statement and
//! its concurrency caveats.

use crate::Operations;

use docbridge_core::{Result, Value};
use docbridge_sql::{
    stmt::{TableRef, Upsert},
    Serializer, Statement,
};

/// Builds the upsert statement for `ops`.
///
/// The stored columns are the `$set` fields followed by the `$unset` fields
/// as nulls, then the `$inc` fields. A field under several operators is
/// stored once, by the operator that wins in [`Operations::compile`]. Every
/// primary-key column must be among the stored columns.
pub fn statement(
    table: TableRef,
    ops: &Operations,
    primary_key: &[impl AsRef<str>],
) -> Result<Upsert> {
    let set = ops
        .set
        .iter()
        .filter(|(field, _)| !ops.unset.contains_key(field))
        .map(|(field, value)| (field.to_string(), value.clone()))
        .chain(ops.unset.keys().map(|field| (field.to_string(), Value::Null)))
        .collect();

    let inc = ops
        .inc
        .iter()
        .map(|(field, delta)| (field.to_string(), delta.clone()))
        .collect();

    Upsert::new(table, set, inc, primary_key)
}

/// Renders the upsert for `ops` against `schema.table`, returning the SQL
/// text and its positional parameters.
pub fn generate(
    schema: &str,
    table: &str,
    ops: &Operations,
    primary_key: &[impl AsRef<str>],
) -> Result<(String, Vec<Value>)> {
    let stmt = statement(TableRef::new(schema, table), ops, primary_key)?;

    let mut params = Vec::new();
    let sql = Serializer::postgresql().serialize(&Statement::Upsert(stmt), &mut params);

    Ok((sql, params))
}
