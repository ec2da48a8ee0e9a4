//! Command-line interface for repo-ingest
//!
//! `ingest` runs one repository through the pipeline; the `list-*` commands
//! and `clean` inspect and prune what is already on disk.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, DEFAULT_CONFIG_FILE};
use crate::domain::Config;

mod clean;
mod ingest;
mod list;

/// Manage repository ingestion with exclusions, token counting and retention
#[derive(Parser)]
#[command(name = "repo-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (.yaml, .yml or .toml)
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE,
        env = "REPO_INGEST_CONFIG"
    )]
    config: PathBuf,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a configured repository into a versioned artifact
    Ingest(ingest::IngestArgs),

    /// List configured repositories and their last ingest
    ListRepos,

    /// List exclusion profiles
    ListProfiles,

    /// List artifacts in the output directory
    ListIngested,

    /// Delete old artifacts, keeping the newest per repository
    Clean(clean::CleanArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Ingest(args) => ingest::run(&cli.config, args),
        Commands::ListRepos => list::repos(&open_config(&cli.config)?),
        Commands::ListProfiles => list::profiles(&open_config(&cli.config)?),
        Commands::ListIngested => list::ingested(&open_config(&cli.config)?),
        Commands::Clean(args) => clean::run(&open_config(&cli.config)?, args),
    }
}

fn open_config(path: &Path) -> Result<Config> {
    load_config(path).with_context(|| format!("Failed loading {}", path.display()))
}
