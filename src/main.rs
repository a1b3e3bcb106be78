//! Staydash Server
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Config file (first found): `--config`, `~/.config/staydash/config.toml`,
//! `/etc/staydash/config.toml`, `./config.toml`.
//!
//! Environment variables:
//! - `STAYDASH_DATASET`: Encounter CSV (default: cleaned_diabetic_data_with_Median 1.csv)
//! - `STAYDASH_HOST`: Host to bind to (default: 127.0.0.1)
//! - `STAYDASH_PORT`: Port to listen on (default: 8054)
//! - `STAYDASH_DEBUG`: Verbose error bodies (default: true)
//! - `STAYDASH_LOG_LEVEL`, `STAYDASH_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Overrides the log level filter

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staydash::api::{serve, AppState};
use staydash::config::{generate_default_config, Config, LoggingConfig};
use staydash::dataset::{CsvLoader, REQUIRED_COLUMNS};

#[derive(Parser)]
#[command(name = "staydash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hospital stay dashboard for diabetic encounter records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Encounter CSV, overrides the config file
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Port to listen on, overrides the config file
    #[arg(short, long, global = true)]
    pub port: Option<u16>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dataset and serve the dashboard (default)
    Serve,

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(dataset) = cli.dataset {
        config.dataset.path = dataset;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging, config.server.debug);

    tracing::info!("Starting Staydash v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset: {:?}", config.dataset.path);

    let dataset = CsvLoader::new()
        .require(REQUIRED_COLUMNS)
        .load(&config.dataset.path)
        .context("Cannot start without the encounter dataset")?;

    let state = AppState::new(dataset, config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Staydash stopped");
    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` wins when set
fn init_tracing(logging: &LoggingConfig, debug: bool) {
    let http_level = if debug { "debug" } else { logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("staydash={},tower_http={}", logging.level, http_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
