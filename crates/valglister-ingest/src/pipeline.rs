//! Indexing run: recreate the index, then stream every export into it
//!
//! Files are processed one at a time in file name order, rows in source
//! order. Records are collected into batches of `batch_size` and every batch
//! is acknowledged by the sink before the next row is read. The first error
//! ends the run; whatever was indexed up to that point stays in the index.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, instrument};
use valglister_common::CanonicalRecord;
use walkdir::WalkDir;

use crate::config::{IngestConfig, DEFAULT_BATCH_SIZE};
use crate::error::{IngestError, Result};
use crate::formats::SourceFormat;
use crate::reader::RecordReader;
use crate::schema;
use crate::sink::IndexSink;

/// Settings of one indexing run
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub data_dir: PathBuf,
    pub batch_size: usize,
    pub show_progress: bool,
}

impl PipelineSettings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: false,
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(&config.data_dir).with_batch_size(config.batch_size)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Show a spinner per file on the terminal
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Outcome of one processed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: String,
    pub records: u64,
    pub batches: u64,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    pub fn total_records(&self) -> u64 {
        self.files.iter().map(|file| file.records).sum()
    }

    pub fn total_batches(&self) -> u64 {
        self.files.iter().map(|file| file.batches).sum()
    }
}

/// Export files directly under `data_dir`, sorted by file name
///
/// Only files with a `.csv` extension (any case) are returned; symlinks are
/// resolved to their targets, and subdirectories are not descended into.
pub fn discover_files(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_csv = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if entry.file_type().is_file() && is_csv {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Drives one indexing run into a sink
pub struct IngestPipeline<S: IndexSink> {
    sink: S,
    settings: PipelineSettings,
}

impl<S: IndexSink> IngestPipeline<S> {
    pub fn new(sink: S, settings: PipelineSettings) -> Self {
        Self { sink, settings }
    }

    /// Run to completion
    ///
    /// Consumes the pipeline; the sink is closed on success and dropped on
    /// failure.
    pub async fn run(mut self) -> Result<RunSummary> {
        if self.settings.batch_size == 0 {
            return Err(IngestError::config("Batch size must be greater than 0"));
        }

        schema::prepare_index(&mut self.sink).await?;

        // Resolve every format up front so an unknown file fails the run
        // before any document is written.
        let plan = discover_files(&self.settings.data_dir)?
            .into_iter()
            .map(|path| SourceFormat::from_path(&path).map(|format| (path, format)))
            .collect::<Result<Vec<_>>>()?;

        info!(
            data_dir = %self.settings.data_dir.display(),
            files = plan.len(),
            "Discovered export files"
        );

        let mut summary = RunSummary::default();
        for (path, format) in &plan {
            let file = self.process_file(path, *format).await?;
            summary.files.push(file);
        }

        self.sink.close().await?;

        info!(
            files = summary.files.len(),
            records = summary.total_records(),
            batches = summary.total_batches(),
            "Indexing complete"
        );

        Ok(summary)
    }

    #[instrument(skip(self, path, format), fields(file = %path.display(), format = %format))]
    async fn process_file(&mut self, path: &Path, format: SourceFormat) -> Result<FileSummary> {
        let mut reader = RecordReader::open(path, format.delimiter()).await?;
        let progress = self.progress_for(path);

        let mut file = FileSummary {
            path: path.to_path_buf(),
            format: format.identifier().to_string(),
            records: 0,
            batches: 0,
        };
        let mut batch = Vec::with_capacity(self.settings.batch_size);

        while let Some(row) = reader.next_row().await? {
            batch.push(format.transform(&row)?);

            if batch.len() >= self.settings.batch_size {
                self.flush(&mut batch, &mut file).await?;
                progress.set_position(file.records);
            }
        }
        self.flush(&mut batch, &mut file).await?;

        progress.finish_with_message(format!("{}: {} records", format, file.records));
        info!(records = file.records, batches = file.batches, "Indexed file");

        Ok(file)
    }

    async fn flush(
        &mut self,
        batch: &mut Vec<CanonicalRecord>,
        file: &mut FileSummary,
    ) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let ack = self.sink.bulk(batch).await?;
        file.records += batch.len() as u64;
        file.batches += 1;
        debug!(batch = file.batches, items = ack.items, took_ms = ack.took_ms, "Batch written");

        batch.clear();
        Ok(())
    }

    fn progress_for(&self, path: &Path) -> ProgressBar {
        if !self.settings.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} records")
        {
            pb.set_style(style);
        }
        pb.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discovery_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), "x\n").unwrap();
        fs::write(dir.path().join("a.CSV"), "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "x\n").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("archive").join("c.csv"), "x\n").unwrap();

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.CSV", "b.csv"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_follows_symlinked_exports() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("x.csv");
        fs::write(&target, "valg,navn\nKommunestyrevalg,Ola\n").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("eksport_kandidater_2023.csv"))
            .unwrap();

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["eksport_kandidater_2023.csv", "x.csv"]);
    }

    #[test]
    fn test_missing_data_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = discover_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(IngestError::Discovery(_))));
    }

    #[test]
    fn test_summary_totals() {
        let summary = RunSummary {
            files: vec![
                FileSummary {
                    path: PathBuf::from("a.csv"),
                    format: "a".to_string(),
                    records: 1200,
                    batches: 3,
                },
                FileSummary {
                    path: PathBuf::from("b.csv"),
                    format: "b".to_string(),
                    records: 10,
                    batches: 1,
                },
            ],
        };

        assert_eq!(summary.total_records(), 1210);
        assert_eq!(summary.total_batches(), 4);
    }

    #[test]
    fn test_settings_builder() {
        let settings = PipelineSettings::new("./data").with_batch_size(50).with_progress(true);
        assert_eq!(settings.batch_size, 50);
        assert!(settings.show_progress);
        assert_eq!(settings.data_dir, PathBuf::from("./data"));
    }
}
