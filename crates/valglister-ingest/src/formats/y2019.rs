//! 2019 exports
//!
//! Lower-case column names throughout. The municipal council file adds the
//! candidate's place of residence (`bosted`).

use valglister_common::{CanonicalRecord, Election};

use crate::normalize::{clean_name, county_from_municipality, gender, municipality_code, parse_year};
use crate::regions::{OSLO_COUNTY_ID, OSLO_MUNICIPALITY_ID, OSLO_NAME};
use crate::row::RawRow;

const YEAR: i32 = 2019;

pub(super) fn fylkesting(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_name: row.text("fylke"),
        ..candidate(row, Election::Fylkesting)
    }
}

pub(super) fn kommunestyre(row: &RawRow) -> CanonicalRecord {
    let municipality_id = row.get("kommunenr").and_then(municipality_code);

    CanonicalRecord {
        county_id: municipality_id.as_deref().and_then(county_from_municipality),
        county_name: row.text("fylke"),
        municipality_id,
        municipality_name: row.text("kommune"),
        residence: row.text("bosted"),
        ..candidate(row, Election::Kommunestyre)
    }
}

pub(super) fn bydelsutvalg(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_id: Some(OSLO_COUNTY_ID.to_string()),
        county_name: Some(OSLO_NAME.to_string()),
        municipality_id: Some(OSLO_MUNICIPALITY_ID.to_string()),
        municipality_name: Some(OSLO_NAME.to_string()),
        city_district: row.text("bydel"),
        ..candidate(row, Election::Bydelsutvalg)
    }
}

fn candidate(row: &RawRow, election: Election) -> CanonicalRecord {
    CanonicalRecord {
        party_id: row.text("partikode"),
        party_name: row.text("partinavn"),
        candidate_id: row.text("kandidatnr"),
        name: row.get("navn").map(clean_name),
        year_born: row.get("fødselsår").and_then(parse_year),
        gender: row.get("kjønn").and_then(gender),
        ..CanonicalRecord::new(YEAR, election)
    }
}
