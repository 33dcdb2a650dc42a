use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use docbridge_core::{bail, err, stmt, Document, Error, Result};
use postgres::{
    types::{FromSql, Kind, Type},
    Row,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// The binary wire form of a column value, of any type.
struct Raw<'a>(&'a [u8]);

impl<'a> FromSql<'a> for Raw<'a> {
    fn from_sql(_: &Type, raw: &'a [u8]) -> std::result::Result<Self, BoxError> {
        Ok(Raw(raw))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

/// Converts a row into a document keyed by column name, in column order.
pub(crate) fn to_document(row: &Row) -> Result<Document> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let raw = row
                .try_get::<usize, Option<Raw<'_>>>(index)
                .map_err(Error::driver_operation_failed)?;

            Ok((column.name(), to_value(column.name(), column.type_(), raw.map(|raw| raw.0))?))
        })
        .collect()
}

/// Converts the wire form of a PostgreSQL value to a [`stmt::Value`].
///
/// Arrays become lists, enums their label and domains convert as their base
/// type. A type with no docbridge counterpart (`interval`, geometric types,
/// ranges, ...) keeps its binary wire form as bytes so that a bulk export
/// never stops at an exotic column.
fn to_value(column: &str, ty: &Type, raw: Option<&[u8]>) -> Result<stmt::Value> {
    let Some(raw) = raw else {
        return Ok(stmt::Value::Null);
    };

    // NOTE: the inner representation of the PostgreSQL type enum is not
    // accessible, so each type is matched by constant.
    let value = match *ty {
        Type::BOOL => stmt::Value::Bool(decode(column, ty, raw)?),
        Type::INT2 => decode::<i16>(column, ty, raw)?.into(),
        Type::INT4 => decode::<i32>(column, ty, raw)?.into(),
        Type::INT8 => stmt::Value::I64(decode(column, ty, raw)?),
        Type::OID => decode::<u32>(column, ty, raw)?.into(),
        Type::FLOAT4 => stmt::Value::F64(decode::<f32>(column, ty, raw)?.into()),
        Type::FLOAT8 => stmt::Value::F64(decode(column, ty, raw)?),
        Type::NUMERIC => {
            let v = decode::<Decimal>(column, ty, raw)?;
            match v.to_f64() {
                Some(v) => stmt::Value::F64(v),
                None => bail!("numeric value {v} in column `{column}` out of range"),
            }
        }
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            stmt::Value::String(decode(column, ty, raw)?)
        }
        Type::CHAR => stmt::Value::String(char::from(decode::<i8>(column, ty, raw)? as u8).to_string()),
        Type::UUID => stmt::Value::String(decode::<uuid::Uuid>(column, ty, raw)?.to_string()),
        Type::INET => stmt::Value::String(decode::<std::net::IpAddr>(column, ty, raw)?.to_string()),
        Type::BYTEA => stmt::Value::Bytes(decode(column, ty, raw)?),
        Type::TIMESTAMPTZ => stmt::Value::Timestamp(decode::<DateTime<Utc>>(column, ty, raw)?),
        Type::TIMESTAMP => stmt::Value::Timestamp(decode::<NaiveDateTime>(column, ty, raw)?.and_utc()),
        Type::DATE => stmt::Value::Timestamp(
            decode::<NaiveDate>(column, ty, raw)?
                .and_time(NaiveTime::MIN)
                .and_utc(),
        ),
        Type::TIME => stmt::Value::String(decode::<NaiveTime>(column, ty, raw)?.to_string()),
        Type::JSON | Type::JSONB => decode::<serde_json::Value>(column, ty, raw)?.into(),
        _ => match ty.kind() {
            // Multi-dimensional arrays are flattened in element order
            Kind::Array(member) => stmt::Value::List(
                decode::<Vec<Option<Raw<'_>>>>(column, ty, raw)?
                    .into_iter()
                    .map(|item| to_value(column, member, item.map(|raw| raw.0)))
                    .collect::<Result<_>>()?,
            ),
            // The binary form of an enum value is its label
            Kind::Enum(_) => stmt::Value::String(decode::<&str>(column, ty, raw)?.to_string()),
            Kind::Domain(base) => to_value(column, base, Some(raw))?,
            _ => {
                tracing::trace!(column, %ty, "keeping wire form of unsupported type");
                stmt::Value::Bytes(raw.to_vec())
            }
        },
    };

    Ok(value)
}

fn decode<'a, T: FromSql<'a>>(column: &str, ty: &Type, raw: &'a [u8]) -> Result<T> {
    T::from_sql(ty, raw).map_err(|e| err!("cannot decode column `{column}` of type {ty}: {e}"))
}
