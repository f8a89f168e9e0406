//! Canonical candidate document schema
//!
//! Every historical export format is mapped onto [`CanonicalRecord`], the one
//! document shape stored in the search index.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValglisterError;

/// Election type, the closed set of elections present in the candidate lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Election {
    /// Parliamentary election (stortingsvalg)
    Storting,
    /// County council election (fylkestingsvalg)
    Fylkesting,
    /// Municipal council election (kommunestyrevalg)
    Kommunestyre,
    /// Oslo city district board election (bydelsutvalgsvalg)
    Bydelsutvalg,
}

impl Election {
    pub const ALL: [Election; 4] = [
        Election::Storting,
        Election::Fylkesting,
        Election::Kommunestyre,
        Election::Bydelsutvalg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Election::Storting => "storting",
            Election::Fylkesting => "fylkesting",
            Election::Kommunestyre => "kommunestyre",
            Election::Bydelsutvalg => "bydelsutvalg",
        }
    }

    /// Whether records of this election carry municipality fields
    pub fn has_municipality(self) -> bool {
        matches!(self, Election::Kommunestyre | Election::Bydelsutvalg)
    }

    /// Whether records of this election carry city district fields
    pub fn has_city_district(self) -> bool {
        matches!(self, Election::Bydelsutvalg)
    }
}

impl std::str::FromStr for Election {
    type Err = ValglisterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Election::ALL
            .into_iter()
            .find(|election| election.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValglisterError::InvalidElection(s.to_string()))
    }
}

impl std::fmt::Display for Election {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate gender as published in the lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// One election, identified by year and election type (e.g. `2015/kommunestyre`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElectionKey {
    pub year: i32,
    pub election: Election,
}

impl ElectionKey {
    pub fn new(year: i32, election: Election) -> Self {
        Self { year, election }
    }
}

impl std::str::FromStr for ElectionKey {
    type Err = ValglisterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ValglisterError::InvalidElectionKey(s.to_string());

        let (year, election) = s.split_once('/').ok_or_else(invalid)?;
        let year = year.trim().parse().map_err(|_| invalid())?;
        let election = election.parse().map_err(|_| invalid())?;

        Ok(Self { year, election })
    }
}

impl std::fmt::Display for ElectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.year, self.election)
    }
}

/// Canonical candidate document
///
/// Only `year` and `election` are always present. Absent fields are left out
/// of the serialized document rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub year: i32,

    pub election: Election,

    /// Two-digit county code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_name: Option<String>,

    /// Four-digit municipality code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_district_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_district: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,

    /// Ballot position, kept as published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_born: Option<i32>,

    /// Serialized as `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_born: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl CanonicalRecord {
    /// Create a record with only the mandatory fields set
    pub fn new(year: i32, election: Election) -> Self {
        Self {
            year,
            election,
            county_id: None,
            county_name: None,
            municipality_id: None,
            municipality_name: None,
            city_district_id: None,
            city_district: None,
            party_id: None,
            party_name: None,
            candidate_id: None,
            name: None,
            year_born: None,
            date_born: None,
            residence: None,
            gender: None,
        }
    }

    pub fn key(&self) -> ElectionKey {
        ElectionKey::new(self.year, self.election)
    }
}
