//! Crate-level error type
//!
//! Covers startup and infrastructure failures. Request-level failures use
//! [`crate::handlers::ApiError`] and [`crate::responses::ValidationError`].

use thiserror::Error;

use crate::repository::RepositoryError;

/// Result type alias using the crate's [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring and running the service
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Could not establish the database pool
    #[error("Database error: {0}")]
    Database(String),

    /// Storage operation failed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
