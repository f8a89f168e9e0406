//! Valglister Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads the published Norwegian candidate list exports (2011 onwards) into
//! one Elasticsearch index with a single document schema.
//!
//! # Overview
//!
//! - **Formats**: one transform per historical export layout ([`formats::SourceFormat`])
//! - **Reader**: streaming CSV rows ([`reader::RecordReader`])
//! - **Sink**: the index writer behind the [`sink::IndexSink`] trait
//! - **Pipeline**: the sequential indexing run ([`pipeline::IngestPipeline`])
//! - **Reuse**: candidate reuse between two elections ([`reuse::calculate`])
//!
//! # Example
//!
//! ```no_run
//! use valglister_ingest::config::IngestConfig;
//! use valglister_ingest::pipeline::{IngestPipeline, PipelineSettings};
//! use valglister_ingest::sink::ElasticsearchSink;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let sink = ElasticsearchSink::from_config(&config)?;
//!
//!     let summary = IngestPipeline::new(sink, PipelineSettings::from_config(&config))
//!         .run()
//!         .await?;
//!     println!("indexed {} records", summary.total_records());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod regions;
pub mod reuse;
pub mod row;
pub mod schema;
pub mod sink;

pub use error::{IngestError, Result};
