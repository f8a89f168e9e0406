//! Candidate reuse between two elections
//!
//! Counts how many of the top-placed candidates of one election were also
//! top-placed in an earlier one. Reads a CSV export of the candidate index
//! with the same camelCase column names as the indexed documents.
//!
//! A candidate is identified by name and birth year; the lists carry no
//! stable person identifier.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use valglister_common::{Election, ElectionKey};

use crate::error::Result;

/// Default number of list positions counted as top-placed
pub const DEFAULT_TOP_POSITIONS: u32 = 5;

/// Elections to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReuseQuery {
    pub previous: ElectionKey,
    pub current: ElectionKey,
    /// Candidates whose list number is below this are counted
    pub top_positions: u32,
}

impl Default for ReuseQuery {
    fn default() -> Self {
        Self {
            previous: ElectionKey::new(2011, Election::Kommunestyre),
            current: ElectionKey::new(2015, Election::Kommunestyre),
            top_positions: DEFAULT_TOP_POSITIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReuseSummary {
    /// Distinct top-placed candidates in the current election
    pub current_total: usize,
    /// How many of those were top-placed in the previous election as well
    pub also_in_previous: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow {
    year: i32,
    election: Election,
    #[serde(default)]
    candidate_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    year_born: Option<String>,
}

impl ExportRow {
    fn key(&self) -> ElectionKey {
        ElectionKey::new(self.year, self.election)
    }

    /// Rows without a numeric list number are never top-placed
    fn is_top(&self, top_positions: u32) -> bool {
        self.candidate_id
            .as_deref()
            .and_then(|id| id.trim().parse::<u32>().ok())
            .is_some_and(|position| position < top_positions)
    }
}

type Identity = (Option<String>, Option<String>);

/// Compute the reuse summary from an exported CSV file
pub fn calculate(export_csv: &Path, query: &ReuseQuery) -> Result<ReuseSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(export_csv)?;

    let mut current: HashSet<Identity> = HashSet::new();
    let mut previous: HashSet<Identity> = HashSet::new();
    let mut rows = 0u64;

    for row in reader.deserialize::<ExportRow>() {
        let row = row?;
        rows += 1;

        if !row.is_top(query.top_positions) {
            continue;
        }

        let key = row.key();
        let identity = (row.name, row.year_born);
        if key == query.previous {
            previous.insert(identity.clone());
        }
        if key == query.current {
            current.insert(identity);
        }
    }

    let summary = ReuseSummary {
        current_total: current.len(),
        also_in_previous: current.intersection(&previous).count(),
    };

    debug!(
        rows,
        previous = %query.previous,
        current = %query.current,
        current_total = summary.current_total,
        also_in_previous = summary.also_in_previous,
        "Computed candidate reuse"
    );

    Ok(summary)
}
