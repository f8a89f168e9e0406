//! 2023 unified export
//!
//! County council, municipal council and Oslo city district lists share one
//! file. The election is read from the `valg` column of every row, and the
//! region fields of a record are limited to the levels its election has.
//!
//! The published birth dates carry a two-digit year that the export tool
//! expanded to `20YY`. The separate `fødselsår` column is authoritative and
//! replaces the year of the date.

use chrono::Datelike;
use valglister_common::{CanonicalRecord, Election};

use crate::error::{IngestError, Result};
use crate::normalize::{
    clean_name, correct_century, county_code, county_from_municipality, gender, municipality_code,
    parse_date_born, parse_year,
};
use crate::row::RawRow;

const LABELS: &[(&str, Election)] = &[
    ("fylkestingsvalg", Election::Fylkesting),
    ("kommunestyrevalg", Election::Kommunestyre),
    ("bydelsutvalgsvalg", Election::Bydelsutvalg),
];

/// Resolve the `valg` label of a 2023 row
///
/// Accepts the published labels and the canonical election names
/// (case-insensitive). Parliamentary elections were not held in 2023.
pub fn election_for_label(label: &str) -> Result<Election> {
    let normalized = label.trim().to_lowercase();

    LABELS
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(_, election)| *election)
        .or_else(|| {
            normalized
                .parse::<Election>()
                .ok()
                .filter(|election| *election != Election::Storting)
        })
        .ok_or_else(|| IngestError::UnknownElectionLabel { label: label.to_string() })
}

pub(super) fn unified(row: &RawRow) -> Result<CanonicalRecord> {
    let election = election_for_label(row.get("valg").unwrap_or_default())?;

    let municipality_id = row.get("kommunenr").and_then(municipality_code);
    let county_id = row
        .get("fylkenr")
        .and_then(county_code)
        .or_else(|| municipality_id.as_deref().and_then(county_from_municipality));

    let published_year = row.get("fødselsår").and_then(parse_year);
    let date_born = row
        .get("fødselsdato")
        .and_then(parse_date_born)
        .and_then(|date| match published_year {
            Some(year) => correct_century(date, year),
            None => Some(date),
        });

    let mut record = CanonicalRecord {
        county_id,
        county_name: row.text("fylke"),
        party_name: row.text("partinavn"),
        candidate_id: row.text("kandidatnr"),
        name: row.get("navn").map(clean_name),
        year_born: published_year.or(date_born.map(|date| date.year())),
        date_born,
        residence: row.text("bosted"),
        gender: row.get("kjønn").and_then(gender),
        ..CanonicalRecord::new(2023, election)
    };

    if election.has_municipality() {
        record.municipality_id = municipality_id;
        record.municipality_name = row.text("kommune");
    }
    if election.has_city_district() {
        record.city_district_id = row.text("bydelnr");
        record.city_district = row.text("bydel");
    }

    Ok(record)
}
