use super::Error;

/// Error when decoding a tagged special value with an unrecognized
/// discriminator.
#[derive(Debug)]
pub(super) struct UnknownEncodedType {
    pub(super) tag: Box<str>,
}

impl std::error::Error for UnknownEncodedType {}

impl core::fmt::Display for UnknownEncodedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown encoded type `{}`", self.tag)
    }
}

impl Error {
    /// Creates an unknown encoded type error.
    pub fn unknown_encoded_type(tag: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEncodedType(UnknownEncodedType {
            tag: tag.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown encoded type error.
    pub fn is_unknown_encoded_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownEncodedType(_))
    }
}
