use super::Error;

/// Error when a point lookup returns no rows.
///
/// Callers should treat the document as deleted.
#[derive(Debug)]
pub(super) struct DocumentNotFoundError {
    pub(super) id: Box<str>,
}

impl std::error::Error for DocumentNotFoundError {}

impl core::fmt::Display for DocumentNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "document not found: {}", self.id)
    }
}

impl Error {
    /// Creates a document not found error for the given identifier.
    pub fn document_not_found(id: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DocumentNotFound(DocumentNotFoundError {
            id: id.into().into(),
        }))
    }

    /// Returns `true` if this error is a document not found error.
    pub fn is_document_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DocumentNotFound(_))
    }
}
