use super::Error;

/// Error when a declared index set is malformed.
///
/// This occurs when:
/// - An index is declared with no keys
/// - A field appears more than once within one index
/// - A field or collection name is empty
/// - The same collection is declared twice
/// - The same index intent is declared twice for one collection
///
/// These errors are raised before any call reaches the database.
#[derive(Debug)]
pub(super) struct InvalidDeclaration {
    message: Box<str>,
}

impl std::error::Error for InvalidDeclaration {}

impl core::fmt::Display for InvalidDeclaration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid declaration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid declaration error.
    pub fn invalid_declaration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDeclaration(InvalidDeclaration {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid declaration error.
    pub fn is_invalid_declaration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidDeclaration(_)))
    }
}
