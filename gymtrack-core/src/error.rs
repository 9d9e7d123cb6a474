//! Error types for gymtrack-core

use thiserror::Error;

/// Main error type for the gymtrack-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Unrecognized period token
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Program window requested without both dates
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// A numeric field was present but not a finite number
    #[error("non-finite value for {field}")]
    NonFiniteValue { field: &'static str },

    /// Input failed a range or shape check
    #[error("validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Program not found
    #[error("program not found: {0}")]
    ProgramNotFound(String),

    /// Member not found
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// Actor lacks the capability for an operation
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl Error {
    /// Whether the error stems from caller input rather than the backend.
    ///
    /// Request layers map these to a 400-class response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPeriod(_)
                | Error::InvalidWindow(_)
                | Error::NonFiniteValue { .. }
                | Error::Validation(_)
        )
    }
}

/// Result type alias for gymtrack-core
pub type Result<T> = std::result::Result<T, Error>;
