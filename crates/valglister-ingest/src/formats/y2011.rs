//! 2011 county and municipal council exports
//!
//! Both files share one upper-case column layout. `KOMMNR`/`KOMMUNE` name
//! the county in the county council file and the municipality in the
//! municipal council file.

use valglister_common::{CanonicalRecord, Election};

use crate::normalize::{
    clean_name, county_code, county_from_municipality, gender, municipality_code, parse_year,
};
use crate::row::RawRow;

const YEAR: i32 = 2011;

pub(super) fn fylkesting(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        county_id: row.get("KOMMNR").and_then(county_code),
        county_name: row.text("KOMMUNE"),
        ..candidate(row, Election::Fylkesting)
    }
}

pub(super) fn kommunestyre(row: &RawRow) -> CanonicalRecord {
    let municipality_id = row.get("KOMMNR").and_then(municipality_code);

    CanonicalRecord {
        county_id: municipality_id.as_deref().and_then(county_from_municipality),
        municipality_id,
        municipality_name: row.text("KOMMUNE"),
        ..candidate(row, Election::Kommunestyre)
    }
}

fn candidate(row: &RawRow, election: Election) -> CanonicalRecord {
    CanonicalRecord {
        party_id: row.text("PARTIKODE"),
        party_name: row.text("PARTINAVN"),
        candidate_id: row.text("PLASSNR"),
        name: row.get("NAVN").map(clean_name),
        year_born: row.get("FØDT").and_then(parse_year),
        gender: row.get("KJØNN").and_then(gender),
        ..CanonicalRecord::new(YEAR, election)
    }
}
