//! Global document identifiers.
//!
//! An identifier addresses one row as `<database>.<collection>#<payload>`,
//! where the payload is the standard base64 encoding of the JSON object
//! mapping each primary-key column to its value. It is the only handle
//! callers hold on a document.

use docbridge_core::{
    stmt::{Document, Value},
    Error, Result,
};

use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// Separates the namespace from the key payload
pub const SEPARATOR: char = '#';

/// Key column a scalar key is stored under
pub const DEFAULT_KEY_COLUMN: &str = "_id";

/// Accepts payloads with or without trailing padding
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded document identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentId {
    pub database: String,
    pub collection: String,

    /// Primary-key tuple. `None` only for identifiers parsed leniently whose
    /// payload could not be decoded.
    pub key: Option<Document>,
}

impl DocumentId {
    /// Parses an identifier, failing if the key payload cannot be decoded.
    pub fn parse(id: &str) -> Result<Self> {
        let (database, collection, payload) = split(id)?;
        let key = decode_key(payload).map_err(|reason| Error::malformed_identifier(id, reason))?;

        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
            key: Some(key),
        })
    }

    /// Parses an identifier, tolerating an undecodable key payload.
    ///
    /// Clients may send provisional identifiers for documents that were
    /// never persisted; their payload is shaped like a key but carries no
    /// usable tuple. The structure of the identifier is still enforced.
    pub fn parse_lenient(id: &str) -> Result<Self> {
        let (database, collection, payload) = split(id)?;

        let key = match decode_key(payload) {
            Ok(key) => Some(key),
            Err(reason) => {
                tracing::debug!(id, %reason, "ignoring undecodable key payload");
                None
            }
        };

        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
            key,
        })
    }

    /// `<database>.<collection>`
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    /// Returns the primary-key tuple, which must be present and non-empty
    /// for any operation addressing a stored row.
    pub fn key(&self) -> Result<&Document> {
        match &self.key {
            Some(key) if !key.is_empty() => Ok(key),
            Some(_) => Err(Error::malformed_identifier(
                self.namespace(),
                "empty primary-key tuple",
            )),
            None => Err(Error::malformed_identifier(
                self.namespace(),
                "primary-key tuple could not be decoded",
            )),
        }
    }
}

/// Encodes an identifier from a namespace and a primary-key tuple.
///
/// A key that is not a document is normalized to `{ "_id": key }` first, so
/// a scalar key round-trips as a single-column tuple.
pub fn encode(namespace: &str, key: impl Into<Value>) -> String {
    let key = match key.into() {
        Value::Document(key) => key,
        scalar => {
            tracing::debug!(
                namespace,
                kind = scalar.kind_name(),
                "normalizing scalar key to `_id`"
            );
            let mut key = Document::with_capacity(1);
            key.insert(DEFAULT_KEY_COLUMN, scalar);
            key
        }
    };

    let json = serde_json::Value::Object((&key).into()).to_string();
    format!(
        "{namespace}{SEPARATOR}{}",
        general_purpose::STANDARD.encode(json)
    )
}

/// Returns the `<database>.<collection>` part of an identifier.
pub fn namespace(id: &str) -> Result<&str> {
    match id.find(SEPARATOR) {
        Some(pos) => Ok(&id[..pos]),
        None => Err(Error::malformed_identifier(id, "missing `#` separator")),
    }
}

fn split(id: &str) -> Result<(&str, &str, &str)> {
    let (namespace, payload) = id
        .split_once(SEPARATOR)
        .ok_or_else(|| Error::malformed_identifier(id, "missing `#` separator"))?;

    if payload.contains(SEPARATOR) {
        return Err(Error::malformed_identifier(id, "more than one `#` separator"));
    }

    let (database, collection) = namespace
        .split_once('.')
        .ok_or_else(|| Error::malformed_identifier(id, "missing `.` before `#`"))?;

    if collection.contains('.') {
        return Err(Error::malformed_identifier(id, "more than one `.` before `#`"));
    }

    Ok((database, collection, payload))
}

fn decode_key(payload: &str) -> std::result::Result<Document, String> {
    let bytes = DECODER
        .decode(payload)
        .map_err(|err| format!("invalid base64 payload: {err}"))?;

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(key)) => Ok(key.into()),
        Ok(_) => Err("key payload is not a JSON object".to_string()),
        Err(err) => Err(format!("invalid JSON payload: {err}")),
    }
}
