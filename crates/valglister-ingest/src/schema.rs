//! Candidate index mapping and lifecycle

use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::sink::IndexSink;

/// Fields stored as exact-match keywords
const KEYWORD_FIELDS: [&str; 12] = [
    "election",
    "countyId",
    "countyName",
    "municipalityId",
    "municipalityName",
    "cityDistrictId",
    "cityDistrict",
    "partyId",
    "partyName",
    "candidateId",
    "residence",
    "gender",
];

/// Explicit mapping of the candidate index
///
/// `name` is full-text searchable and keeps an exact copy in `name.raw` for
/// sorting and aggregations.
pub fn index_mapping() -> Value {
    let mut properties = serde_json::Map::new();

    properties.insert("year".to_string(), json!({ "type": "integer" }));
    properties.insert("yearBorn".to_string(), json!({ "type": "integer" }));
    for field in KEYWORD_FIELDS {
        properties.insert(field.to_string(), json!({ "type": "keyword" }));
    }
    properties.insert(
        "name".to_string(),
        json!({
            "type": "text",
            "fields": { "raw": { "type": "keyword" } }
        }),
    );
    properties.insert(
        "dateBorn".to_string(),
        json!({ "type": "date", "format": "yyyy-MM-dd" }),
    );

    json!({ "properties": properties })
}

/// Drop and recreate the index so a run always starts from an empty index
pub async fn prepare_index<S: IndexSink + ?Sized>(sink: &mut S) -> Result<()> {
    sink.delete_index().await?;
    sink.create_index(&index_mapping()).await?;

    info!("Index ready");
    Ok(())
}
