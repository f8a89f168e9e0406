//! 2013 parliamentary export, the only one with English column names

use valglister_common::{CanonicalRecord, Election};

use crate::normalize::{clean_name, county_code, gender, parse_year};
use crate::row::RawRow;

pub(super) fn storting(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_id: row.get("county_number").and_then(county_code),
        county_name: row.text("county"),
        party_id: row.text("party_id"),
        party_name: row.text("party_name"),
        candidate_id: row.text("candidate_number"),
        name: row.get("candidate_name").map(clean_name),
        year_born: row.get("candidate_birthyear").and_then(parse_year),
        gender: row.get("candidate_gender").and_then(gender),
        ..CanonicalRecord::new(2013, Election::Storting)
    }
}
