use super::Error;

/// Error when a document identifier does not follow the
/// `<database>.<collection>#<payload>` structure, or its payload could not
/// be decoded in strict mode.
#[derive(Debug)]
pub(super) struct MalformedIdentifier {
    pub(super) id: Box<str>,
    pub(super) reason: Box<str>,
}

impl std::error::Error for MalformedIdentifier {}

impl core::fmt::Display for MalformedIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "malformed document identifier `{}`: {}",
            self.id, self.reason
        )
    }
}

impl Error {
    /// Creates a malformed identifier error.
    pub fn malformed_identifier(id: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedIdentifier(MalformedIdentifier {
            id: id.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed identifier error.
    pub fn is_malformed_identifier(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedIdentifier(_))
    }
}
