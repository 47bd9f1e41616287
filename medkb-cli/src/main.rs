//! medkb - knowledge examples from public medical data sources
//!
//! Harvests one representative example per catalog entry and converts the
//! NLM journal list to JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use medkb_core::config::ClientConfig;
use medkb_core::connectors::Registry;
use medkb_core::harvest::{self, HarvestOptions, NameColumn, DEFAULT_COLUMN_HEADER};
use medkb_core::journals;
use medkb_core::transport::{OfflineTransport, ReqwestTransport, Transport};

mod sources_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "medkb",
    about = "Collect knowledge examples from public medical data sources",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[clap(long, global = true)]
    log_json: bool,

    /// Client configuration file (YAML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Append a knowledge example column to a source catalog
    Harvest {
        /// Catalog CSV with a header row
        #[clap(long)]
        input: PathBuf,

        /// Where to write the extended catalog
        #[clap(long)]
        output: PathBuf,

        /// Header of the source-name column
        #[clap(long, conflicts_with = "name_index")]
        name_column: Option<String>,

        /// Zero-based index of the source-name column
        #[clap(long, default_value_t = harvest::DEFAULT_NAME_INDEX)]
        name_index: usize,

        /// Header of the appended column
        #[clap(long, default_value = DEFAULT_COLUMN_HEADER)]
        column_header: String,

        /// Pause after each connector call, in milliseconds (overrides config)
        #[clap(long)]
        delay_ms: Option<u64>,

        /// Skip all network requests; API sources record a failure
        #[clap(long)]
        dry_run: bool,

        /// Print the run summary as JSON
        #[clap(long)]
        json: bool,
    },

    /// Resolve one source name and print its knowledge example
    Fetch {
        /// Source name as it appears in the catalog
        name: String,

        /// Output the example as JSON
        #[clap(long)]
        json: bool,

        /// Skip all network requests
        #[clap(long)]
        dry_run: bool,
    },

    /// List registered connectors
    List {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Convert the NLM journal list to JSON
    Journals {
        /// NLM journal list text file (J_Medline.txt)
        #[clap(long)]
        input: PathBuf,

        /// JSON file to write
        #[clap(long)]
        output: PathBuf,
    },
}

/// Initialize tracing with CLI flags
fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    // Logs go to stderr; stdout carries command output
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_transport(config: &ClientConfig, dry_run: bool) -> Result<Box<dyn Transport>> {
    if dry_run {
        info!("Dry run: no network requests will be made");
        return Ok(Box::new(OfflineTransport));
    }
    let transport = ReqwestTransport::new(config).context("Failed to build HTTP client")?;
    Ok(Box::new(transport))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.log_json);

    let config = ClientConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    debug!("Client config: {:?}", config);

    match cli.command {
        Command::Harvest {
            input,
            output,
            name_column,
            name_index,
            column_header,
            delay_ms,
            dry_run,
            json,
        } => {
            let mut config = config;
            if let Some(delay_ms) = delay_ms {
                config.pacing_ms = delay_ms;
            }

            let options = HarvestOptions {
                name_column: match name_column {
                    Some(header) => NameColumn::Header(header),
                    None => NameColumn::Index(name_index),
                },
                column_header,
                ..HarvestOptions::from_config(&config)
            };

            let http = build_transport(&config, dry_run)?;
            let registry = Registry::standard();
            let summary =
                harvest::harvest_file(&registry, http.as_ref(), &input, &output, &options)
                    .await
                    .with_context(|| format!("Harvest of {} failed", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                println!("Output written to {}", output.display());
            }
        }

        Command::Fetch {
            name,
            json,
            dry_run,
        } => {
            let http = build_transport(&config, dry_run)?;
            sources_cli::fetch(&Registry::standard(), http.as_ref(), &name, json).await?;
        }

        Command::List { json } => {
            sources_cli::list(&Registry::standard(), json)?;
        }

        Command::Journals { input, output } => {
            let records = journals::parse_file(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            journals::write_json(&output, &records)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            info!("Parsed {} journals from {}", records.len(), input.display());
            println!("{} journals written to {}", records.len(), output.display());
        }
    }

    Ok(())
}
