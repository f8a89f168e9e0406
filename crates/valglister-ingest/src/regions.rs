//! Region lookup tables
//!
//! Some exports only name the region. These constant tables supply the codes
//! for the exports that need them.

/// County and municipality of Oslo, the only region with city district elections
pub const OSLO_NAME: &str = "Oslo";
pub const OSLO_COUNTY_ID: &str = "03";
pub const OSLO_MUNICIPALITY_ID: &str = "0301";

/// Parliamentary electoral districts and their county codes
///
/// The 19 districts follow the pre-2020 counties; the 2020 county merger did
/// not change them, so 2021 still uses the old county codes.
const PRE_2020_DISTRICTS: &[(&str, &str)] = &[
    ("Østfold", "01"),
    ("Akershus", "02"),
    ("Oslo", "03"),
    ("Hedmark", "04"),
    ("Oppland", "05"),
    ("Buskerud", "06"),
    ("Vestfold", "07"),
    ("Telemark", "08"),
    ("Aust-Agder", "09"),
    ("Vest-Agder", "10"),
    ("Rogaland", "11"),
    ("Hordaland", "12"),
    ("Sogn og Fjordane", "14"),
    ("Møre og Romsdal", "15"),
    ("Sør-Trøndelag", "16"),
    ("Nord-Trøndelag", "17"),
    ("Nordland", "18"),
    ("Troms", "19"),
    ("Finnmark", "20"),
];

/// Name to code table for one election year
#[derive(Debug)]
pub struct RegionTable {
    year: i32,
    entries: &'static [(&'static str, &'static str)],
}

impl RegionTable {
    pub const fn new(year: i32, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { year, entries }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Look up the code for a region name (case-insensitive, trimmed)
    pub fn code_for(&self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|(entry, _)| entry.to_lowercase() == name.to_lowercase())
            .map(|(_, code)| *code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub static STORTING_DISTRICTS_2021: RegionTable = RegionTable::new(2021, PRE_2020_DISTRICTS);
