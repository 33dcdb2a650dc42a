//! Tagged transport form of dates and binary buffers.
//!
//! ```text
//! { "type": "Date", "millisSinceEpoch": <integer> }
//! { "type": "Binary", "subtype": 0, "base64Payload": <string> }
//! ```
//!
//! Both directions walk nested documents in place. Lists and scalars are
//! left as they are.

use docbridge_core::{err, Document, Error, Result, Value};

use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use chrono::DateTime;

/// Discriminator field of a tagged value
pub const TYPE: &str = "type";

pub const DATE: &str = "Date";
pub const BINARY: &str = "Binary";

const MILLIS_SINCE_EPOCH: &str = "millisSinceEpoch";
const SUBTYPE: &str = "subtype";
const BASE64_PAYLOAD: &str = "base64Payload";

const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Replaces every timestamp and byte buffer with its tagged form.
///
/// Returns the same document so calls can be chained. Tagged values hold no
/// special values themselves, so encoding twice changes nothing.
pub fn encode(doc: &mut Document) -> &mut Document {
    for value in doc.values_mut() {
        match value {
            Value::Timestamp(ts) => {
                *value = Value::Document(tagged_date(ts.timestamp_millis()));
            }
            Value::Bytes(bytes) => {
                *value = Value::Document(tagged_binary(bytes));
            }
            Value::Document(nested) => {
                encode(nested);
            }
            _ => {}
        }
    }

    doc
}

/// Replaces every tagged value with its native form.
///
/// A nested document whose `type` field holds a string is a tagged value;
/// any tag other than `Date` or `Binary` fails with
/// [`Error::unknown_encoded_type`].
pub fn decode(doc: &mut Document) -> Result<&mut Document> {
    for value in doc.values_mut() {
        let Value::Document(nested) = value else {
            continue;
        };

        match nested.get(TYPE).and_then(Value::as_str) {
            Some(DATE) => *value = decode_date(nested)?,
            Some(BINARY) => *value = decode_binary(nested)?,
            Some(tag) => return Err(Error::unknown_encoded_type(tag)),
            None => {
                decode(nested)?;
            }
        }
    }

    Ok(doc)
}

fn tagged_date(millis: i64) -> Document {
    let mut tagged = Document::with_capacity(2);
    tagged.insert(TYPE, DATE);
    tagged.insert(MILLIS_SINCE_EPOCH, millis);
    tagged
}

fn tagged_binary(bytes: &[u8]) -> Document {
    let mut tagged = Document::with_capacity(3);
    tagged.insert(TYPE, BINARY);
    tagged.insert(SUBTYPE, 0);
    tagged.insert(BASE64_PAYLOAD, general_purpose::STANDARD.encode(bytes));
    tagged
}

fn decode_date(tagged: &Document) -> Result<Value> {
    let millis = match tagged.get(MILLIS_SINCE_EPOCH) {
        Some(Value::I64(millis)) => *millis,
        Some(Value::F64(millis)) if millis.fract() == 0.0 => *millis as i64,
        Some(Value::String(millis)) => millis
            .parse::<i64>()
            .map_err(|_| err!("invalid `{MILLIS_SINCE_EPOCH}` in tagged Date: {millis:?}"))?,
        _ => return Err(err!("tagged Date is missing an integer `{MILLIS_SINCE_EPOCH}`")),
    };

    DateTime::from_timestamp_millis(millis)
        .map(Value::Timestamp)
        .ok_or_else(|| err!("tagged Date out of range: {millis}"))
}

fn decode_binary(tagged: &Document) -> Result<Value> {
    let payload = tagged
        .get(BASE64_PAYLOAD)
        .and_then(Value::as_str)
        .ok_or_else(|| err!("tagged Binary is missing a string `{BASE64_PAYLOAD}`"))?;

    DECODER
        .decode(payload)
        .map(Value::Bytes)
        .map_err(|e| err!("invalid `{BASE64_PAYLOAD}` in tagged Binary: {e}"))
}
