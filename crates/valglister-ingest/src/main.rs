//! Valglister Ingest - candidate list indexing tool

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use valglister_common::logging::{init_logging, LogConfig, LogLevel};
use valglister_common::ElectionKey;
use valglister_ingest::config::{IngestConfig, DEFAULT_BATCH_SIZE, DEFAULT_DATA_DIR};
use valglister_ingest::pipeline::{IngestPipeline, PipelineSettings};
use valglister_ingest::reuse::{self, ReuseQuery, DEFAULT_TOP_POSITIONS};
use valglister_ingest::sink::ElasticsearchSink;

#[derive(Parser, Debug)]
#[command(name = "valglister-ingest")]
#[command(author, version, about = "Index Norwegian election candidate lists")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recreate the index and load every export in the data directory
    Index {
        /// Directory holding the export CSV files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Records per bulk request
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Show a progress spinner per file
        #[arg(long)]
        progress: bool,
    },

    /// Count top-placed candidates that also stood in an earlier election
    Reuse {
        /// CSV export of the candidate index
        #[arg(short, long)]
        input: PathBuf,

        /// Earlier election, as year/election
        #[arg(long, default_value = "2011/kommunestyre")]
        previous: ElectionKey,

        /// Later election, as year/election
        #[arg(long, default_value = "2015/kommunestyre")]
        current: ElectionKey,

        /// List positions below this number count as top-placed
        #[arg(long, default_value_t = DEFAULT_TOP_POSITIONS)]
        top: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("valglister-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    if let Err(e) = run(cli.command).await {
        error!(error = %e, "Run failed");
        return Err(e);
    }

    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Index {
            data_dir,
            batch_size,
            progress,
        } => {
            let config = IngestConfig::from_env()?
                .with_data_dir(data_dir)
                .with_batch_size(batch_size);
            config.validate()?;

            info!(
                elasticsearch = %config.elasticsearch_url,
                index = %config.index_name,
                "Indexing candidate lists"
            );

            let sink = ElasticsearchSink::from_config(&config)?;
            let settings = PipelineSettings::from_config(&config).with_progress(progress);
            let summary = IngestPipeline::new(sink, settings).run().await?;

            info!(
                files = summary.files.len(),
                records = summary.total_records(),
                "Ingestion complete"
            );
        },
        Command::Reuse {
            input,
            previous,
            current,
            top,
        } => {
            let query = ReuseQuery {
                previous,
                current,
                top_positions: top,
            };
            let summary = reuse::calculate(&input, &query)?;

            println!("{}", serde_json::to_string_pretty(&summary)?);
        },
    }

    Ok(())
}
