use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends, tagged with the backend that failed so
/// health reports and logs can say which store went away.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{backend} store unavailable: {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from a backend failure.
    pub fn unavailable(
        backend: &'static str,
        message: String,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Unavailable {
            backend,
            message,
            source: Box::new(source),
        }
    }

    /// Name of the backend that raised the error.
    pub fn backend(&self) -> &'static str {
        match self {
            StorageError::Unavailable { backend, .. } => backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_names_the_failing_backend() {
        let err = StorageError::unavailable(
            "mongodb",
            "ping failed".into(),
            std::io::Error::other("boom"),
        );
        assert_eq!(err.backend(), "mongodb");
        assert_eq!(err.to_string(), "mongodb store unavailable: ping failed");
    }
}
