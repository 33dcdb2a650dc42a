//! Update operation documents.

use crate::schema::Table;

use docbridge_core::{bail, Document, Error, Result, Value};
use docbridge_sql::stmt::Assignments;

/// A parsed `{ $set, $unset, $inc }` operation document.
///
/// When a field appears under several operators, `$inc` wins over `$set`
/// and `$unset`, and `$unset` wins over `$set`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Operations {
    /// Fields to store
    pub set: Document,

    /// Fields to null out; the values are ignored
    pub unset: Document,

    /// Numeric deltas
    pub inc: Document,
}

impl Operations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field, value);
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.unset.insert(field, true);
        self
    }

    pub fn inc(mut self, field: impl Into<String>, delta: impl Into<Value>) -> Self {
        self.inc.insert(field, delta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty() && self.inc.is_empty()
    }

    /// Stores each field of `key` under `$set` unless the operations already
    /// assign it.
    pub fn set_missing(&mut self, key: &Document) {
        for (field, value) in key {
            if !self.set.contains_key(field) {
                self.set.insert(field, value.clone());
            }
        }
    }

    /// Flattens the operations into column assignments.
    ///
    /// Every field becomes a known column of `table`. For a row that does
    /// not exist yet (`is_new`) an increment stores its delta; otherwise it
    /// adds the delta to the stored value in the same statement.
    pub fn compile(&self, table: &mut Table, is_new: bool) -> Assignments {
        let mut assignments = Assignments::new();

        for (field, value) in &self.set {
            assignments.set(field, value.clone());
        }

        for field in self.unset.keys() {
            assignments.set(field, Value::Null);
        }

        table.add_columns(assignments.columns());

        for (field, delta) in &self.inc {
            table.add_column(field);

            if is_new {
                assignments.set(field, delta.clone());
            } else {
                assignments.inc(field, delta.clone());
            }
        }

        assignments
    }
}

impl TryFrom<Document> for Operations {
    type Error = Error;

    fn try_from(doc: Document) -> Result<Self> {
        let mut ops = Self::new();

        for (key, value) in doc {
            let Some(op) = key.strip_prefix('$') else {
                bail!("update document field `{key}` is not an operator");
            };

            let kind = value.kind_name();
            let Value::Document(fields) = value else {
                bail!("`{key}` must map fields to values, got a {kind}");
            };

            match op {
                "set" => ops.set.extend(fields),
                "unset" => ops.unset.extend(fields),
                "inc" => {
                    if let Some((field, delta)) = fields
                        .iter()
                        .find(|(_, delta)| !matches!(delta, Value::I64(_) | Value::F64(_)))
                    {
                        bail!(
                            "`$inc` delta for `{field}` must be numeric, got a {}",
                            delta.kind_name()
                        );
                    }
                    ops.inc.extend(fields)
                }
                _ => return Err(Error::unsupported_operator(op, "update operations")),
            }
        }

        Ok(ops)
    }
}
