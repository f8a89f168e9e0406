//! Elasticsearch REST sink

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serde_jsonlines::JsonLinesWriter;
use tracing::{debug, info};
use valglister_common::CanonicalRecord;

use super::{BulkAck, IndexSink};
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};

const NDJSON: &str = "application/x-ndjson";

/// Writes candidate records to one Elasticsearch index
pub struct ElasticsearchSink {
    client: Option<Client>,
    base_url: String,
    index: String,
}

/// `{"index":{"_index":"..."}}` action line of a bulk request
#[derive(Serialize)]
struct BulkAction<'a> {
    index: BulkTarget<'a>,
}

#[derive(Serialize)]
struct BulkTarget<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    took: u64,
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    status: u16,
    #[serde(default)]
    error: Option<Value>,
}

impl BulkResponse {
    fn first_error(&self) -> Option<String> {
        self.items
            .iter()
            .flat_map(|item| item.values())
            .find_map(|item| {
                item.error
                    .as_ref()
                    .map(|error| format!("item status {}: {}", item.status, error))
            })
    }
}

impl ElasticsearchSink {
    /// Create a sink for `index` at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        index: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Some(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index: index.into(),
        })
    }

    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        Self::new(&config.elasticsearch_url, &config.index_name, config.request_timeout())
    }

    fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| IngestError::sink_write("Elasticsearch sink is already closed"))
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    fn bulk_url(&self) -> String {
        format!("{}/_bulk", self.base_url)
    }

    /// Newline-delimited action and document lines for `records`
    fn bulk_body(&self, records: &[CanonicalRecord]) -> Result<Vec<u8>> {
        let action = BulkAction {
            index: BulkTarget { index: &self.index },
        };

        let mut writer = JsonLinesWriter::new(Vec::new());
        for record in records {
            writer.write(&action)?;
            writer.write(record)?;
        }
        writer.flush()?;

        Ok(writer.into_inner())
    }
}

#[async_trait]
impl IndexSink for ElasticsearchSink {
    async fn delete_index(&mut self) -> Result<()> {
        let url = self.index_url();
        let response = self
            .client()?
            .delete(&url)
            .send()
            .await
            .map_err(|e| IngestError::index_setup(format!("DELETE {} failed: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(index = %self.index, "Index did not exist");
            return Ok(());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::index_setup(format!(
                "DELETE {} returned {}: {}",
                url, status, body
            )));
        }

        info!(index = %self.index, "Deleted index");
        Ok(())
    }

    async fn create_index(&mut self, mapping: &Value) -> Result<()> {
        let url = self.index_url();
        let response = self
            .client()?
            .put(&url)
            .json(&json!({ "mappings": mapping }))
            .send()
            .await
            .map_err(|e| IngestError::index_setup(format!("PUT {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::index_setup(format!(
                "PUT {} returned {}: {}",
                url, status, body
            )));
        }

        info!(index = %self.index, "Created index");
        Ok(())
    }

    async fn bulk(&mut self, records: &[CanonicalRecord]) -> Result<BulkAck> {
        if records.is_empty() {
            return Ok(BulkAck::default());
        }

        let url = self.bulk_url();
        let body = self.bulk_body(records)?;
        let response = self
            .client()?
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, NDJSON)
            .body(body)
            .send()
            .await
            .map_err(|e| IngestError::sink_write(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestError::sink_write(format!("_bulk returned {}: {}", status, body)));
        }

        let parsed: BulkResponse = response.json().await.map_err(|e| {
            IngestError::sink_write(format!("POST {} returned an unreadable response: {}", url, e))
        })?;
        if parsed.errors {
            let detail = parsed
                .first_error()
                .unwrap_or_else(|| "response reported errors without item details".to_string());
            return Err(IngestError::sink_write(detail));
        }

        debug!(documents = records.len(), took_ms = parsed.took, "Bulk batch acknowledged");

        Ok(BulkAck {
            items: records.len(),
            took_ms: parsed.took,
        })
    }

    async fn close(&mut self) -> Result<()> {
        if self.client.take().is_some() {
            debug!(index = %self.index, "Closed Elasticsearch sink");
        }
        Ok(())
    }
}
