//! Error types shared across valglister crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, ValglisterError>;

/// Errors raised by the shared schema types
#[derive(Error, Debug)]
pub enum ValglisterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(
        "Invalid election '{0}', expected one of storting, fylkesting, kommunestyre, bydelsutvalg"
    )]
    InvalidElection(String),

    #[error("Invalid election key '{0}', expected '<year>/<election>' (e.g. '2015/kommunestyre')")]
    InvalidElectionKey(String),
}
