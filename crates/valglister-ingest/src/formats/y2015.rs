//! 2015 exports
//!
//! The county council file carries county names only, without codes. The
//! city district file covers Oslo alone and does not name the county or the
//! municipality at all.
//!
//! City district rows get county `03` and municipality `0301`, the same
//! Oslo values as the 2019 file. Earlier loads of this export stored the
//! sentinel county `0300` and left the municipality empty, so documents from
//! those loads will not match these on either field. Changing back to `0300`
//! needs a decision from the data owner.

use valglister_common::{CanonicalRecord, Election};

use crate::normalize::{clean_name, county_from_municipality, gender, municipality_code, parse_year};
use crate::regions::{OSLO_COUNTY_ID, OSLO_MUNICIPALITY_ID, OSLO_NAME};
use crate::row::RawRow;

const YEAR: i32 = 2015;

pub(super) fn bydelsutvalg(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_id: Some(OSLO_COUNTY_ID.to_string()),
        county_name: Some(OSLO_NAME.to_string()),
        municipality_id: Some(OSLO_MUNICIPALITY_ID.to_string()),
        municipality_name: Some(OSLO_NAME.to_string()),
        city_district: row.text("Bydel"),
        ..candidate(row, Election::Bydelsutvalg, "Kandidat")
    }
}

pub(super) fn fylkesting(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_name: row.text("Fylke"),
        ..candidate(row, Election::Fylkesting, "Kandidat")
    }
}

pub(super) fn kommunestyre(row: &RawRow) -> CanonicalRecord {
    let municipality_id = row.get("Kommunenr").and_then(municipality_code);

    CanonicalRecord {
        county_id: municipality_id.as_deref().and_then(county_from_municipality),
        county_name: row.text("Fylke"),
        municipality_id,
        municipality_name: row.text("Kommune"),
        ..candidate(row, Election::Kommunestyre, "Navn")
    }
}

fn candidate(row: &RawRow, election: Election, name_column: &str) -> CanonicalRecord {
    CanonicalRecord {
        party_id: row.text("Partikode"),
        party_name: row.text("Parti"),
        candidate_id: row.text("Kandidatnr"),
        name: row.get(name_column).map(clean_name),
        year_born: row.get("Fødselsår").and_then(parse_year),
        gender: row.get("Kjønn").and_then(gender),
        ..CanonicalRecord::new(YEAR, election)
    }
}
