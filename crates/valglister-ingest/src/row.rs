//! Raw CSV rows keyed by their source column names

use std::collections::BTreeMap;

/// One input record, column name to cell value
///
/// Column names are taken exactly as they appear in the export header (after
/// trimming and BOM removal). Rows are ordered maps so that diagnostics
/// render them deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    /// Build a row from a header record and a data record
    ///
    /// Extra cells without a header are dropped; missing trailing cells
    /// simply leave the column absent.
    pub fn from_record<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        headers.into_iter().zip(values).collect()
    }

    /// Trimmed cell value; empty cells and missing columns are `None`
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Owned variant of [`RawRow::get`]
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

impl std::fmt::Display for RawRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (column, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:?}", column, value)?;
        }
        f.write_str("}")
    }
}
