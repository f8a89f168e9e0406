use chrono::Datelike;
use valglister_common::{CanonicalRecord, Election};

use crate::normalize::{clean_name, gender, parse_date_born};
use crate::row::RawRow;

/// 2017 parliamentary export; birth year comes from the full birth date
pub(super) fn storting(row: &RawRow) -> CanonicalRecord {
    let date_born = row.get("Fødselsdato").and_then(parse_date_born);

    CanonicalRecord {
        county_name: row.text("Fylke"),
        party_id: row.text("Partikode"),
        party_name: row.text("Parti"),
        candidate_id: row.text("Kandidatnr"),
        name: row.get("Navn").map(clean_name),
        year_born: date_born.map(|date| date.year()),
        date_born,
        gender: row.get("Kjønn").and_then(gender),
        ..CanonicalRecord::new(2017, Election::Storting)
    }
}
