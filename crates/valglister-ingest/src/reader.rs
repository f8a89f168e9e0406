//! Streaming CSV reader for candidate list exports

use std::path::Path;

use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord, Trim};
use tokio::fs::File;
use tracing::debug;

use crate::error::Result;
use crate::row::RawRow;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads one export file row by row
///
/// The first line is the header. Cells are trimmed, and rows with fewer or
/// more cells than the header are accepted.
pub struct RecordReader {
    reader: AsyncReader<File>,
    headers: Vec<String>,
    record: StringRecord,
    rows_read: u64,
}

impl RecordReader {
    /// Open `path` and read its header line
    pub async fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;

        let mut reader = AsyncReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .create_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .await?
            .iter()
            .enumerate()
            .map(|(i, header)| match i {
                0 => header.trim_start_matches(BYTE_ORDER_MARK).trim().to_string(),
                _ => header.to_string(),
            })
            .collect();

        debug!(path = %path.display(), columns = headers.len(), "Opened export");

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }

    /// Next data row, or `None` at end of file
    pub async fn next_row(&mut self) -> Result<Option<RawRow>> {
        if !self.reader.read_record(&mut self.record).await? {
            return Ok(None);
        }
        self.rows_read += 1;

        Ok(Some(RawRow::from_record(
            self.headers.iter().map(String::as_str),
            self.record.iter(),
        )))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows returned so far
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn export(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_semicolon_rows_in_order() {
        let file = export("fylke;navn\nOslo; Kari \nRogaland;Ola\n");

        let mut reader = RecordReader::open(file.path(), b';').await.unwrap();
        assert_eq!(reader.headers(), ["fylke", "navn"]);

        let first = reader.next_row().await.unwrap().unwrap();
        assert_eq!(first.get("fylke"), Some("Oslo"));
        assert_eq!(first.get("navn"), Some("Kari"));

        let second = reader.next_row().await.unwrap().unwrap();
        assert_eq!(second.get("fylke"), Some("Rogaland"));

        assert!(reader.next_row().await.unwrap().is_none());
        assert_eq!(reader.rows_read(), 2);
    }

    #[tokio::test]
    async fn test_strips_byte_order_mark() {
        let file = export("\u{feff}valgdistrikt,navn\nOslo,Jane Doe\n");

        let mut reader = RecordReader::open(file.path(), b',').await.unwrap();
        let row = reader.next_row().await.unwrap().unwrap();

        assert_eq!(reader.headers()[0], "valgdistrikt");
        assert_eq!(row.get("valgdistrikt"), Some("Oslo"));
    }

    #[tokio::test]
    async fn test_short_rows_are_accepted() {
        let file = export("a,b,c\n1,2\n");

        let mut reader = RecordReader::open(file.path(), b',').await.unwrap();
        let row = reader.next_row().await.unwrap().unwrap();

        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = RecordReader::open("/nonexistent/eksport.csv", b';').await;
        assert!(result.is_err());
    }
}
