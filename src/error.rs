//! Error types for the revgate service.

use thiserror::Error;

/// A specialized Result type for revgate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for revgate operations.
///
/// Only `Connection` and `Query` ever reach the endpoint layer, where they
/// are collapsed to a fixed client-facing message; `Config` is fatal at
/// startup. Malformed warehouse rows are not errors at all: normalization
/// absorbs them into zeroed or placeholder fields.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Missing or invalid configuration; never recovered at runtime
    #[error("Configuration error: {0}")]
    Config(String),

    /// The warehouse session could not be established or re-established
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed on a live session (syntax, permission, timeout)
    #[error("Query error: {0}")]
    Query(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Error::Connection(msg.into())
    }

    /// Create a query error
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Error::Query(msg.into())
    }
}
