//! Error types for candidate list ingestion
//!
//! Every variant is fatal for an indexing run: the pipeline stops at the
//! first error and leaves the partially built index in place for inspection.

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The file name matches no known export format
    #[error("Unsupported format '{0}': no transform is registered for this file name")]
    UnsupportedFormat(String),

    /// The election label of a multi-election export is not one of the known labels
    #[error("Unknown election label '{label}'")]
    UnknownElectionLabel { label: String },

    /// A region name has no entry in the lookup table used to derive its code
    #[error("Unknown region '{region}', no code is known for it (row: {row})")]
    UnknownRegionCode { region: String, row: String },

    /// The search index rejected a bulk request
    #[error("Bulk write failed: {0}")]
    SinkWriteFailure(String),

    /// The search index could not be deleted or created
    #[error("Index setup failed: {0}")]
    IndexSetupFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("CSV export error: {0}")]
    Export(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File discovery error: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error(transparent)]
    Common(#[from] valglister_common::ValglisterError),
}

impl IngestError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an index setup error
    pub fn index_setup(msg: impl Into<String>) -> Self {
        Self::IndexSetupFailure(msg.into())
    }

    /// Create a bulk write error
    pub fn sink_write(msg: impl Into<String>) -> Self {
        Self::SinkWriteFailure(msg.into())
    }
}
