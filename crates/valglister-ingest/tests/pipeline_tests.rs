//! Integration tests for the indexing pipeline
//!
//! Covers:
//! - The full run against a mocked Elasticsearch API
//! - File discovery and format resolution failures
//! - Batching and ordering across files
//! - Transform failures that end the run

mod common;

use common::{
    bulk_documents, bulk_requests, mount_elasticsearch, write_export, RecordingSink, SinkCall,
    INDEX, OSLO_2021,
};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use valglister_common::Election;
use valglister_ingest::pipeline::{IngestPipeline, PipelineSettings};
use valglister_ingest::sink::ElasticsearchSink;
use valglister_ingest::IngestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn elasticsearch(server: &MockServer) -> ElasticsearchSink {
    ElasticsearchSink::new(server.uri(), INDEX, Duration::from_secs(5))
        .expect("Failed to build sink")
}

#[tokio::test]
async fn test_oslo_2021_end_to_end() {
    let server = MockServer::start().await;
    mount_elasticsearch(&server).await;

    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "eksport_kandidater_2021_stortingsvalg.csv", OSLO_2021);

    let summary = IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total_records(), 1);
    assert_eq!(summary.total_batches(), 1);

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<String> = requests.iter().map(|r| r.method.to_string()).collect();
    assert_eq!(methods, ["DELETE", "PUT", "POST"]);

    let bulk = bulk_requests(&server).await;
    let body = String::from_utf8(bulk[0].body.clone()).unwrap();
    let action: serde_json::Value = serde_json::from_str(body.lines().next().unwrap()).unwrap();
    assert_eq!(action, json!({ "index": { "_index": "valglister" } }));

    let documents = bulk_documents(&bulk[0]);
    assert_eq!(
        documents,
        [json!({
            "year": 2021,
            "election": "storting",
            "countyId": "03",
            "countyName": "Oslo",
            "partyId": "A",
            "name": "Jane Doe",
            "yearBorn": 1990,
            "dateBorn": "1990-02-01",
            "gender": "female"
        })]
    );
}

#[tokio::test]
async fn test_index_is_created_with_mapping() {
    let server = MockServer::start().await;
    mount_elasticsearch(&server).await;
    let dir = TempDir::new().unwrap();

    IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let create = requests.iter().find(|r| r.method.to_string() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();

    assert_eq!(body["mappings"]["properties"]["name"]["fields"]["raw"]["type"], "keyword");
    assert_eq!(body["mappings"]["properties"]["dateBorn"]["type"], "date");
}

#[tokio::test]
async fn test_empty_data_dir_recreates_index_only() {
    let server = MockServer::start().await;
    mount_elasticsearch(&server).await;
    let dir = TempDir::new().unwrap();

    let summary = IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap();

    assert!(summary.files.is_empty());
    assert_eq!(summary.total_records(), 0);
    assert!(bulk_requests(&server).await.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unsupported_file_fails_before_any_write() {
    let server = MockServer::start().await;
    mount_elasticsearch(&server).await;

    let dir = TempDir::new().unwrap();
    // Sorts first, so a per-file check would already have written it
    write_export(
        dir.path(),
        "eksport_kandidater_2013_stortingsvalg.csv",
        "county;candidate_name\nOslo;Kari\n",
    );
    write_export(dir.path(), "kandidater_1999.csv", "navn\nOla\n");

    let err = IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap_err();

    match err {
        IngestError::UnsupportedFormat(identifier) => assert_eq!(identifier, "kandidater_1999"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(bulk_requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_files_are_written_in_name_order() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "eksport_kandidater_2021_stortingsvalg.csv",
        "valgdistrikt,navn\nOslo,D\nRogaland,E\nTroms,F\n",
    );
    write_export(
        dir.path(),
        "eksport_kandidater_2013_stortingsvalg.csv",
        "county_number;candidate_name\n3;A\n11;B\n19;C\n",
    );

    let sink = RecordingSink::new();
    let settings = PipelineSettings::new(dir.path()).with_batch_size(2);
    let summary = IngestPipeline::new(sink.clone(), settings).run().await.unwrap();

    let names: Vec<Vec<String>> = sink
        .batches()
        .iter()
        .map(|batch| batch.iter().filter_map(|r| r.name.clone()).collect())
        .collect();
    assert_eq!(names, [vec!["A", "B"], vec!["C"], vec!["D", "E"], vec!["F"]]);

    assert_eq!(summary.files.len(), 2);
    assert_eq!(summary.files[0].format, "eksport_kandidater_2013_stortingsvalg");
    assert_eq!(summary.files[0].records, 3);
    assert_eq!(summary.files[0].batches, 2);
    assert_eq!(summary.total_batches(), 4);

    let calls = sink.calls();
    assert_eq!(calls.first(), Some(&SinkCall::Delete));
    assert_eq!(calls.get(1), Some(&SinkCall::Create));
    assert_eq!(calls.last(), Some(&SinkCall::Close));
    assert_eq!(calls.iter().filter(|c| **c == SinkCall::Close).count(), 1);
}

#[tokio::test]
async fn test_unified_2023_rows_keep_their_own_election() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "eksport_kandidater_2023.csv",
        "valg,fylkenr,fylke,kommunenr,kommune,bydel,navn,fødselsdato,fødselsår\n\
         Fylkestingsvalg,03,Oslo,0301,Oslo,,Kari,01.02.75,1975\n\
         Bydelsutvalgsvalg,03,Oslo,0301,Oslo,Frogner,Ola,15.06.61,1961\n",
    );

    let sink = RecordingSink::new();
    IngestPipeline::new(sink.clone(), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap();

    let records = sink.batches().concat();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].election, Election::Fylkesting);
    assert_eq!(records[0].municipality_id, None);
    assert_eq!(records[0].date_born.unwrap().to_string(), "1975-02-01");
    assert_eq!(records[1].election, Election::Bydelsutvalg);
    assert_eq!(records[1].city_district.as_deref(), Some("Frogner"));
    assert_eq!(records[1].year_born, Some(1961));
}

#[tokio::test]
async fn test_unknown_election_label_ends_run() {
    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "eksport_kandidater_2023.csv", "valg,navn\nSametingsvalg,Ola\n");

    let sink = RecordingSink::new();
    let err = IngestPipeline::new(sink.clone(), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::UnknownElectionLabel { ref label } if label == "Sametingsvalg"
    ));
    assert!(sink.batches().is_empty());
    assert!(!sink.calls().contains(&SinkCall::Close));
}

#[tokio::test]
async fn test_unknown_district_ends_run_after_earlier_batches() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "eksport_kandidater_2021_stortingsvalg.csv",
        "valgdistrikt,navn\nOslo,Kari\nViken,Ola\n",
    );

    let sink = RecordingSink::new();
    let settings = PipelineSettings::new(dir.path()).with_batch_size(1);
    let err = IngestPipeline::new(sink.clone(), settings).run().await.unwrap_err();

    match err {
        IngestError::UnknownRegionCode { region, row } => {
            assert_eq!(region, "Viken");
            assert!(row.contains("Ola"));
        },
        other => panic!("unexpected error: {other:?}"),
    }
    // The batch written before the failure stays in the index
    assert_eq!(sink.batches().len(), 1);
}

#[tokio::test]
async fn test_bulk_errors_end_run() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/valglister"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/valglister"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 1,
            "errors": true,
            "items": [{
                "index": { "status": 400, "error": { "type": "mapper_parsing_exception" } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "eksport_kandidater_2021_stortingsvalg.csv", OSLO_2021);

    let err = IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap_err();

    match err {
        IngestError::SinkWriteFailure(detail) => {
            assert!(detail.contains("mapper_parsing_exception"))
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_index_creation_processes_no_files() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/valglister"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/valglister"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("resource_already_exists_exception"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "eksport_kandidater_2021_stortingsvalg.csv", OSLO_2021);

    let err = IngestPipeline::new(elasticsearch(&server), PipelineSettings::new(dir.path()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::IndexSetupFailure(ref detail) if detail.contains("400")));
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    let dir = TempDir::new().unwrap();
    let sink = RecordingSink::new();

    let settings = PipelineSettings::new(dir.path()).with_batch_size(0);
    let err = IngestPipeline::new(sink.clone(), settings)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Config(_)));
    assert!(sink.calls().is_empty());
}
