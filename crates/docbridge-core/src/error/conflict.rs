use super::Error;

/// Error when a write's row-level condition did not hold.
///
/// This covers a stale optimistic version, a row deleted concurrently, and
/// an upsert that did not produce exactly one row. The cases cannot be told
/// apart from the statement result, so they are reported identically.
/// Callers typically refetch and retry.
#[derive(Debug)]
pub(super) struct ConflictError {
    pub(super) context: Option<Box<str>>,
}

impl std::error::Error for ConflictError {}

impl core::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("conflict")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a conflict error.
    pub fn conflict(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Conflict(ConflictError {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is a conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Conflict(_))
    }
}
