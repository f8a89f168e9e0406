use chrono::Datelike;
use valglister_common::{CanonicalRecord, Election};

use crate::error::{IngestError, Result};
use crate::normalize::{clean_name, gender, parse_date_born};
use crate::regions::RegionTable;
use crate::row::RawRow;

/// 2021 parliamentary export
///
/// Only the electoral district name is published; its county code is looked
/// up in `districts`. A district missing from the table fails the row.
pub(super) fn storting(row: &RawRow, districts: &RegionTable) -> Result<CanonicalRecord> {
    let district = row.get("valgdistrikt");
    let county_id = district
        .map(|name| {
            districts
                .code_for(name)
                .map(str::to_string)
                .ok_or_else(|| IngestError::UnknownRegionCode {
                    region: name.to_string(),
                    row: row.to_string(),
                })
        })
        .transpose()?;

    let date_born = row.get("fødselsdato").and_then(parse_date_born);

    Ok(CanonicalRecord {
        county_id,
        county_name: district.map(str::to_string),
        party_id: row.text("partikode"),
        party_name: row.text("partinavn"),
        candidate_id: row.text("kandidatnr"),
        name: row.get("navn").map(clean_name),
        year_born: date_born.map(|date| date.year()),
        date_born,
        residence: row.text("bosted"),
        gender: row.get("kjønn").and_then(gender),
        ..CanonicalRecord::new(2021, Election::Storting)
    })
}
