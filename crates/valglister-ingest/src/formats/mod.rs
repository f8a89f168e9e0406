//! Export format registry
//!
//! Every candidate list export published since 2011 has its own column
//! names, delimiter and value conventions. [`SourceFormat`] enumerates them;
//! the format of a file is identified by its file name, and each format owns
//! a pure transform from a [`RawRow`] to a [`CanonicalRecord`].
//!
//! # Supported exports
//!
//! | file stem | election |
//! |---|---|
//! | `eksport_kandidater_2011_fylkestingsvalg` | fylkesting |
//! | `eksport_kandidater_2011_kommunestyrevalg` | kommunestyre |
//! | `eksport_kandidater_2013_stortingsvalg` | storting |
//! | `eksport_kandidater_2015_bydelsutvalg_oslo` | bydelsutvalg |
//! | `eksport_kandidater_2015_fylkestingsvalg` | fylkesting |
//! | `eksport_kandidater_2015_kommunestyrevalg` | kommunestyre |
//! | `eksport_kandidater_2017_stortingsvalg` | storting |
//! | `eksport_kandidater2019_fylkestingsvalg` | fylkesting |
//! | `eksport_kandidater2019_komunestyrevalg` | kommunestyre |
//! | `eksport_kandidater2019_valg_bydelsutvalg_oslo` | bydelsutvalg |
//! | `eksport_kandidater_2021_stortingsvalg` | storting |
//! | `eksport_kandidater_2023` | per row, from the `valg` column |

mod y2011;
mod y2013;
mod y2015;
mod y2017;
mod y2019;
mod y2021;
mod y2023;

use std::path::Path;

use valglister_common::{CanonicalRecord, Election};

use crate::error::{IngestError, Result};
use crate::regions;
use crate::row::RawRow;

pub use y2023::election_for_label;

/// One historical export layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Fylkesting2011,
    Kommunestyre2011,
    Storting2013,
    Bydelsutvalg2015,
    Fylkesting2015,
    Kommunestyre2015,
    Storting2017,
    Fylkesting2019,
    Kommunestyre2019,
    Bydelsutvalg2019,
    Storting2021,
    /// County, municipal and city district lists in one file
    Unified2023,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 12] = [
        SourceFormat::Fylkesting2011,
        SourceFormat::Kommunestyre2011,
        SourceFormat::Storting2013,
        SourceFormat::Bydelsutvalg2015,
        SourceFormat::Fylkesting2015,
        SourceFormat::Kommunestyre2015,
        SourceFormat::Storting2017,
        SourceFormat::Fylkesting2019,
        SourceFormat::Kommunestyre2019,
        SourceFormat::Bydelsutvalg2019,
        SourceFormat::Storting2021,
        SourceFormat::Unified2023,
    ];

    /// File stem identifying the format
    pub fn identifier(self) -> &'static str {
        match self {
            SourceFormat::Fylkesting2011 => "eksport_kandidater_2011_fylkestingsvalg",
            SourceFormat::Kommunestyre2011 => "eksport_kandidater_2011_kommunestyrevalg",
            SourceFormat::Storting2013 => "eksport_kandidater_2013_stortingsvalg",
            SourceFormat::Bydelsutvalg2015 => "eksport_kandidater_2015_bydelsutvalg_oslo",
            SourceFormat::Fylkesting2015 => "eksport_kandidater_2015_fylkestingsvalg",
            SourceFormat::Kommunestyre2015 => "eksport_kandidater_2015_kommunestyrevalg",
            SourceFormat::Storting2017 => "eksport_kandidater_2017_stortingsvalg",
            SourceFormat::Fylkesting2019 => "eksport_kandidater2019_fylkestingsvalg",
            // Misspelled in the published file name
            SourceFormat::Kommunestyre2019 => "eksport_kandidater2019_komunestyrevalg",
            SourceFormat::Bydelsutvalg2019 => "eksport_kandidater2019_valg_bydelsutvalg_oslo",
            SourceFormat::Storting2021 => "eksport_kandidater_2021_stortingsvalg",
            SourceFormat::Unified2023 => "eksport_kandidater_2023",
        }
    }

    /// Resolve a format from its identifier (case-insensitive)
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let normalized = identifier.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.identifier() == normalized)
            .ok_or(IngestError::UnsupportedFormat(normalized))
    }

    /// Resolve a format from a file path, using the file name without extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| IngestError::UnsupportedFormat(path.display().to_string()))?;

        Self::from_identifier(stem)
    }

    pub fn year(self) -> i32 {
        match self {
            SourceFormat::Fylkesting2011 | SourceFormat::Kommunestyre2011 => 2011,
            SourceFormat::Storting2013 => 2013,
            SourceFormat::Bydelsutvalg2015
            | SourceFormat::Fylkesting2015
            | SourceFormat::Kommunestyre2015 => 2015,
            SourceFormat::Storting2017 => 2017,
            SourceFormat::Fylkesting2019
            | SourceFormat::Kommunestyre2019
            | SourceFormat::Bydelsutvalg2019 => 2019,
            SourceFormat::Storting2021 => 2021,
            SourceFormat::Unified2023 => 2023,
        }
    }

    /// Election of single-election exports; `None` when it varies per row
    pub fn election(self) -> Option<Election> {
        match self {
            SourceFormat::Storting2013
            | SourceFormat::Storting2017
            | SourceFormat::Storting2021 => Some(Election::Storting),
            SourceFormat::Fylkesting2011
            | SourceFormat::Fylkesting2015
            | SourceFormat::Fylkesting2019 => Some(Election::Fylkesting),
            SourceFormat::Kommunestyre2011
            | SourceFormat::Kommunestyre2015
            | SourceFormat::Kommunestyre2019 => Some(Election::Kommunestyre),
            SourceFormat::Bydelsutvalg2015 | SourceFormat::Bydelsutvalg2019 => {
                Some(Election::Bydelsutvalg)
            },
            SourceFormat::Unified2023 => None,
        }
    }

    /// Field delimiter of the export
    pub fn delimiter(self) -> u8 {
        match self {
            SourceFormat::Storting2021 | SourceFormat::Unified2023 => b',',
            _ => b';',
        }
    }

    /// Map one raw row of this format onto the canonical schema
    pub fn transform(self, row: &RawRow) -> Result<CanonicalRecord> {
        let record = match self {
            SourceFormat::Fylkesting2011 => y2011::fylkesting(row),
            SourceFormat::Kommunestyre2011 => y2011::kommunestyre(row),
            SourceFormat::Storting2013 => y2013::storting(row),
            SourceFormat::Bydelsutvalg2015 => y2015::bydelsutvalg(row),
            SourceFormat::Fylkesting2015 => y2015::fylkesting(row),
            SourceFormat::Kommunestyre2015 => y2015::kommunestyre(row),
            SourceFormat::Storting2017 => y2017::storting(row),
            SourceFormat::Fylkesting2019 => y2019::fylkesting(row),
            SourceFormat::Kommunestyre2019 => y2019::kommunestyre(row),
            SourceFormat::Bydelsutvalg2019 => y2019::bydelsutvalg(row),
            SourceFormat::Storting2021 => {
                return y2021::storting(row, &regions::STORTING_DISTRICTS_2021)
            },
            SourceFormat::Unified2023 => return y2023::unified(row),
        };

        Ok(record)
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}
