use super::TableRef;

use docbridge_core::{Error, Result, Value};

/// An insert-or-update of one row, rendered as two correlated CTEs:
///
/// - `update_table` updates the row matching the primary key;
/// - `insert_table` inserts the row only when `update_table` matched nothing.
///
/// The statement returns the row produced by whichever branch fired. Two
/// sessions racing on the same key can still both insert (one fails with a
/// unique violation) or both update; callers must check that exactly one row
/// came back.
#[derive(Debug, Clone)]
pub struct Upsert {
    pub table: TableRef,

    /// Columns stored as-is, primary-key columns included
    pub set: Vec<(String, Value)>,

    /// Columns incremented by a delta when the row exists, initialized to
    /// the delta otherwise
    pub inc: Vec<(String, Value)>,

    /// Positions in `set` of the primary-key columns, in key order
    key: Vec<usize>,
}

impl Upsert {
    /// Builds the upsert. Every primary-key column must be present in `set`.
    ///
    /// A column listed in both `set` and `inc` is incremented.
    pub fn new(
        table: TableRef,
        set: Vec<(String, Value)>,
        inc: Vec<(String, Value)>,
        primary_key: &[impl AsRef<str>],
    ) -> Result<Self> {
        if primary_key.is_empty() {
            docbridge_core::bail!("table {table} has no primary key; cannot generate an upsert");
        }

        let set: Vec<_> = set
            .into_iter()
            .filter(|(column, _)| !inc.iter().any(|(inc_column, _)| inc_column == column))
            .collect();

        let key = primary_key
            .iter()
            .map(|pk| {
                let pk = pk.as_ref();
                set.iter()
                    .position(|(column, _)| column == pk)
                    .ok_or_else(|| Error::missing_primary_key_in_upsert(pk))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            table,
            set,
            inc,
            key,
        })
    }

    /// Positions in `set` of the primary-key columns, in key order.
    pub fn key(&self) -> &[usize] {
        &self.key
    }

    pub fn is_key(&self, index: usize) -> bool {
        self.key.contains(&index)
    }
}
