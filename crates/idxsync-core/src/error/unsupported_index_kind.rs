use super::Error;

/// Error when an observed index uses a key kind other than ascending or
/// descending ordering (`"text"`, `"2dsphere"`, `"hashed"`, ...).
#[derive(Debug)]
pub(super) struct UnsupportedIndexKind {
    field: Box<str>,
    code: Box<str>,
}

impl std::error::Error for UnsupportedIndexKind {}

impl core::fmt::Display for UnsupportedIndexKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported index kind: field `{}` has direction {}",
            self.field, self.code
        )
    }
}

impl Error {
    /// Creates an unsupported index kind error for `field`, whose direction
    /// code rendered as `code`.
    pub fn unsupported_index_kind(field: impl Into<String>, code: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedIndexKind(UnsupportedIndexKind {
            field: field.into().into(),
            code: code.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported index kind error.
    pub fn is_unsupported_index_kind(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnsupportedIndexKind(_)))
    }
}
