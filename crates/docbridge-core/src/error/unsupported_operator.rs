use super::Error;

/// Error when a query or operation document uses an operator outside the
/// supported set.
#[derive(Debug)]
pub(super) struct UnsupportedOperator {
    pub(super) operator: Box<str>,
    pub(super) context: Box<str>,
}

impl std::error::Error for UnsupportedOperator {}

impl core::fmt::Display for UnsupportedOperator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported operator `${}` in {}",
            self.operator, self.context
        )
    }
}

impl Error {
    /// Creates an unsupported operator error.
    ///
    /// `operator` is the name without its `$` sigil; `context` names where it
    /// was found, e.g. ``field `age` ``.
    pub fn unsupported_operator(operator: impl Into<String>, context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperator(UnsupportedOperator {
            operator: operator.into().into(),
            context: context.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operator error.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperator(_))
    }
}
