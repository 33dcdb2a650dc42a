//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON has no timestamp or binary type; timestamps render as RFC 3339
//! strings and bytes as standard base64 strings. Those two shapes do not
//! round-trip back to their native variants.

use super::{Document, Value};

use base64::Engine as _;
use serde_json::{Map, Number};

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::I64(v) => serde_json::Value::Number((*v).into()),
            Value::F64(v) => Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::Bytes(v) => {
                serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(v))
            }
            Value::Timestamp(v) => serde_json::Value::String(v.to_rfc3339()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Document(doc) => serde_json::Value::Object(doc.into()),
        }
    }
}

impl From<&Document> for Map<String, serde_json::Value> {
    fn from(doc: &Document) -> Self {
        doc.iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
            .collect()
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Value::I64(v),
                // u64 beyond i64::MAX and real numbers both land here
                None => Value::F64(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Document(map.into()),
        }
    }
}

impl From<Map<String, serde_json::Value>> for Document {
    fn from(map: Map<String, serde_json::Value>) -> Self {
        map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}
