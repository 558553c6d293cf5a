use std::fmt;

use directory::DirectoryError;

/// Service-level failures: configuration, startup and directory errors.
#[derive(Debug)]
pub enum ServiceError {
    /// The configuration is missing a value or holds an invalid one.
    InvalidConfig(String),
    /// The listener could not be bound or served.
    Server(String),
    /// A directory operation failed.
    Directory(DirectoryError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            ServiceError::Server(msg) => write!(f, "server error: {msg}"),
            ServiceError::Directory(err) => write!(f, "directory error: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Directory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(err: DirectoryError) -> Self {
        ServiceError::Directory(err)
    }
}

/// Result type alias using [`ServiceError`].
pub type ServiceResult<T> = Result<T, ServiceError>;
