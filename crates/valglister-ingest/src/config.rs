//! Ingestion configuration

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{IngestError, Result};

// ============================================================================
// Ingestion Configuration Constants
// ============================================================================

/// Default Elasticsearch base URL for local development.
pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Name of the candidate index.
pub const INDEX_NAME: &str = "valglister";

/// Default timeout for index requests in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default number of records per bulk request.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Default directory holding the export files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration of an indexing run
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Elasticsearch base URL, without trailing slash
    pub elasticsearch_url: String,
    pub index_name: String,
    pub request_timeout_secs: u64,
    pub batch_size: usize,
    pub data_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            elasticsearch_url: DEFAULT_ELASTICSEARCH_URL.to_string(),
            index_name: INDEX_NAME.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            batch_size: DEFAULT_BATCH_SIZE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl IngestConfig {
    /// Load configuration from the environment
    ///
    /// `ELASTICSEARCH_URL` is the only setting read; a `.env` file in the
    /// working directory is honored. Everything else keeps its default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(raw) = std::env::var("ELASTICSEARCH_URL") {
            config = config.with_elasticsearch_url(&raw)?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn with_elasticsearch_url(mut self, raw: &str) -> Result<Self> {
        self.elasticsearch_url = normalize_base_url(raw)?;
        Ok(self)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(IngestError::config("Batch size must be greater than 0"));
        }

        if self.index_name.is_empty() {
            return Err(IngestError::config("Index name cannot be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(IngestError::config("Request timeout must be greater than 0"));
        }

        normalize_base_url(&self.elasticsearch_url)?;

        Ok(())
    }
}

/// Validate an Elasticsearch address and strip its trailing slash
///
/// A bare `host:port` is given the `http://` scheme.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(IngestError::config("Elasticsearch URL cannot be empty"));
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| IngestError::config(format!("Invalid Elasticsearch URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {},
        other => {
            return Err(IngestError::config(format!(
                "Unsupported Elasticsearch URL scheme '{}', expected http or https",
                other
            )))
        },
    }

    if url.host_str().is_none() {
        return Err(IngestError::config(format!("Elasticsearch URL '{}' has no host", raw)));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
