use super::Error;

/// Error when the catalog lookup for a table fails.
///
/// The backend error is attached as the cause:
///
/// ```ignore
/// err.context(Error::metadata_fetch_failed("public.users"))
/// ```
#[derive(Debug)]
pub(super) struct MetadataFetchFailed {
    pub(super) table: Box<str>,
}

impl std::error::Error for MetadataFetchFailed {}

impl core::fmt::Display for MetadataFetchFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to fetch table metadata for {}", self.table)
    }
}

impl Error {
    /// Creates a metadata fetch error for the given table.
    pub fn metadata_fetch_failed(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MetadataFetchFailed(MetadataFetchFailed {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a metadata fetch error.
    pub fn is_metadata_fetch_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MetadataFetchFailed(_))
    }
}
