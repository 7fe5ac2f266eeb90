use super::Error;

/// Error when a database operation fails.
///
/// This wraps errors from the underlying database client when one of the
/// capability operations is rejected:
/// - Connection or authentication errors
/// - `createIndexes` rejected (conflicting options, permission denied)
/// - `dropIndex` rejected (index not found, permission denied)
/// - `listIndexes` / `listCollections` failures
#[derive(Debug)]
pub(super) struct DriverOperationFailed {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverOperationFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DriverOperationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a database operation failure.
    ///
    /// This is the preferred way for [`Database`](crate::Database) implementations to
    /// surface client errors.
    pub fn driver_operation_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::DriverOperationFailed(
            DriverOperationFailed {
                inner: Box::new(err),
            },
        ))
    }

    /// Returns `true` if this error is a database operation failure.
    pub fn is_driver_operation_failed(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DriverOperationFailed(_)))
    }
}
