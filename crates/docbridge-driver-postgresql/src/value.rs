use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use docbridge_core::stmt::Value as CoreValue;
use postgres::types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use rust_decimal::Decimal;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Binds a docbridge value to a statement parameter.
///
/// Statements are prepared, so the server reports the type it inferred for
/// each placeholder and the value is converted to that type.
#[derive(Debug)]
pub struct Value(pub(crate) CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                Type::JSON | Type::JSONB => serde_json::Value::Bool(*value).to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    value.to_string().to_sql(ty, out)
                }
                Type::JSON | Type::JSONB => serde_json::Value::from(*value).to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    value.to_string().to_sql(ty, out)
                }
                Type::JSON | Type::JSONB => serde_json::Value::from(&self.0).to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::String(value) => match *ty {
                Type::UUID => value.parse::<uuid::Uuid>()?.to_sql(ty, out),
                Type::JSON | Type::JSONB => {
                    serde_json::Value::String(value.clone()).to_sql(ty, out)
                }
                // Timestamps and bytes arrive as strings once they went
                // through an encoded identifier
                Type::TIMESTAMPTZ => parse_timestamp(value)?.to_sql(ty, out),
                Type::TIMESTAMP => match value.parse::<NaiveDateTime>() {
                    Ok(naive) => naive.to_sql(ty, out),
                    Err(_) => parse_timestamp(value)?.naive_utc().to_sql(ty, out),
                },
                Type::DATE => match value.parse::<NaiveDate>() {
                    Ok(date) => date.to_sql(ty, out),
                    Err(_) => parse_timestamp(value)?.date_naive().to_sql(ty, out),
                },
                Type::BYTEA => base64::engine::general_purpose::STANDARD
                    .decode(value)?
                    .to_sql(ty, out),
                // TEXT, VARCHAR, BPCHAR, NAME and unknown
                _ if <&str as ToSql>::accepts(ty) => value.as_str().to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::Bytes(value) => match *ty {
                Type::BYTEA => value.to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::Timestamp(value) => match *ty {
                Type::TIMESTAMPTZ => value.to_sql(ty, out),
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
            CoreValue::List(_) | CoreValue::Document(_) => match *ty {
                Type::JSON | Type::JSONB => serde_json::Value::from(&self.0).to_sql(ty, out),
                _ => mismatch(&self.0, ty),
            },
        }
    }

    fn accepts(_: &Type) -> bool {
        // Conversion is decided per value in `to_sql`
        true
    }

    to_sql_checked!();
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, BoxError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

fn mismatch(value: &CoreValue, ty: &Type) -> Result<IsNull, BoxError> {
    Err(format!("cannot bind a {} value to a parameter of type {ty}", value.kind_name()).into())
}
