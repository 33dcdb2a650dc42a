use super::Error;

/// Error when a collection name cannot be split into a schema and a table.
#[derive(Debug)]
pub(super) struct InvalidTableIdentifier {
    pub(super) name: Box<str>,
}

impl std::error::Error for InvalidTableIdentifier {}

impl core::fmt::Display for InvalidTableIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid table identifier: {}", self.name)
    }
}

impl Error {
    /// Creates an invalid table identifier error.
    pub fn invalid_table_identifier(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidTableIdentifier(
            InvalidTableIdentifier {
                name: name.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid table identifier error.
    pub fn is_invalid_table_identifier(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidTableIdentifier(_))
    }
}
