//! Shared helpers for valglister-ingest integration tests
//!
//! - [`mount_elasticsearch`] mounts a minimal Elasticsearch API on a wiremock server
//! - [`RecordingSink`] is an in-memory [`IndexSink`] that records every call
//! - [`write_export`] drops an export file into a test data directory

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use valglister_common::CanonicalRecord;
use valglister_ingest::sink::{BulkAck, IndexSink};
use valglister_ingest::Result;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const INDEX: &str = "valglister";

/// 2021 parliamentary export with a single Oslo candidate
pub const OSLO_2021: &str = concat!(
    "valgdistrikt,partikode,navn,fødselsdato,kjønn\n",
    "Oslo,A,Jane  Doe,01.02.1990,K\n",
);

/// Write `content` to `name` inside `dir`
pub fn write_export(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write export file");
    path
}

/// Mount index delete, index create and a successful `_bulk` endpoint
pub async fn mount_elasticsearch(server: &MockServer) {
    Mock::given(method("DELETE"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "type": "index_not_found_exception" },
            "status": 404
        })))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "index": INDEX
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 2,
            "errors": false,
            "items": []
        })))
        .mount(server)
        .await;
}

/// Received `_bulk` requests, in arrival order
pub async fn bulk_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == "/_bulk")
        .collect()
}

/// Document lines of a bulk request body (every second line)
pub fn bulk_documents(request: &Request) -> Vec<Value> {
    let body = String::from_utf8(request.body.clone()).expect("Bulk body is not UTF-8");
    body.lines()
        .skip(1)
        .step_by(2)
        .map(|line| serde_json::from_str(line).expect("Bulk line is not JSON"))
        .collect()
}

/// A call made to a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Delete,
    Create,
    Bulk(Vec<CanonicalRecord>),
    Close,
}

/// In-memory sink recording every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().expect("poisoned").clone()
    }

    pub fn batches(&self) -> Vec<Vec<CanonicalRecord>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Bulk(records) => Some(records),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SinkCall) {
        self.calls.lock().expect("poisoned").push(call);
    }
}

#[async_trait]
impl IndexSink for RecordingSink {
    async fn delete_index(&mut self) -> Result<()> {
        self.record(SinkCall::Delete);
        Ok(())
    }

    async fn create_index(&mut self, _mapping: &Value) -> Result<()> {
        self.record(SinkCall::Create);
        Ok(())
    }

    async fn bulk(&mut self, records: &[CanonicalRecord]) -> Result<BulkAck> {
        self.record(SinkCall::Bulk(records.to_vec()));
        Ok(BulkAck {
            items: records.len(),
            took_ms: 0,
        })
    }

    async fn close(&mut self) -> Result<()> {
        self.record(SinkCall::Close);
        Ok(())
    }
}
