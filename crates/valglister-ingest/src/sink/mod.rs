//! Search index sink
//!
//! The pipeline writes through the [`IndexSink`] trait; [`ElasticsearchSink`]
//! is the production implementation.

mod elasticsearch;

use async_trait::async_trait;
use serde_json::Value;
use valglister_common::CanonicalRecord;

use crate::error::Result;

pub use elasticsearch::ElasticsearchSink;

/// Acknowledgment of one bulk request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkAck {
    /// Documents accepted by the index
    pub items: usize,
    /// Server-side processing time in milliseconds
    pub took_ms: u64,
}

/// Destination of canonical records
///
/// Calls are awaited one at a time; a sink never sees overlapping requests.
#[async_trait]
pub trait IndexSink: Send {
    /// Delete the index. A missing index is not an error.
    async fn delete_index(&mut self) -> Result<()>;

    /// Create the index with the given mappings
    async fn create_index(&mut self, mapping: &Value) -> Result<()>;

    /// Write one batch of records, returning once the index has acknowledged it
    async fn bulk(&mut self, records: &[CanonicalRecord]) -> Result<BulkAck>;

    /// Release the connection. Called once, after the last batch.
    async fn close(&mut self) -> Result<()>;
}
