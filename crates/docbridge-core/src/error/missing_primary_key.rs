use super::Error;

/// Error when an upsert's `$set` lacks one of the table's primary-key columns.
#[derive(Debug)]
pub(super) struct MissingPrimaryKeyInUpsert {
    pub(super) column: Box<str>,
}

impl std::error::Error for MissingPrimaryKeyInUpsert {}

impl core::fmt::Display for MissingPrimaryKeyInUpsert {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "primary key column `{}` must be included in `$set` to generate an upsert",
            self.column
        )
    }
}

impl Error {
    /// Creates a missing primary key error naming the absent column.
    pub fn missing_primary_key_in_upsert(column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKeyInUpsert(
            MissingPrimaryKeyInUpsert {
                column: column.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key_in_upsert(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKeyInUpsert(_))
    }
}
