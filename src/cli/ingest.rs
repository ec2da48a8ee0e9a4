//! Ingest command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::Path;

use super::open_config;
use crate::domain::DEFAULT_PROFILE;
use crate::ingest::{ingest, IngestRequest};
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct IngestArgs {
    /// Repository name from the configuration
    #[arg(short = 'r', long, value_name = "NAME")]
    pub repo: Option<String>,

    /// Exclusion profile to apply
    #[arg(short = 'p', long, value_name = "PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Version label for the artifact name (skips the release lookup)
    #[arg(short = 'V', long = "version", value_name = "VERSION")]
    pub version_label: Option<String>,
}

pub fn run(config_path: &Path, args: IngestArgs) -> Result<()> {
    let Some(repo_name) = args.repo.as_deref() else {
        anyhow::bail!("--repo is required for ingest command");
    };

    let mut config = open_config(config_path)?;

    println!(
        "\n{}",
        style(format!("=== Ingesting {repo_name} with profile '{}' ===", args.profile)).bold()
    );

    let request =
        IngestRequest { repo_name, profile: &args.profile, version: args.version_label.as_deref() };
    let report = ingest(config_path, &mut config, &request)
        .with_context(|| format!("Failed to ingest {repo_name}"))?;

    let command_output = report.command_output.trim();
    if !command_output.is_empty() {
        println!("{command_output}");
    }

    for warning in &report.warnings {
        println!("{} {warning}", style("Warning:").yellow());
    }

    let metadata = &report.metadata;
    println!("\n{} Successfully ingested {repo_name}", style("✅").green());
    println!("   Output: {}", report.artifact.display());
    println!("   Version: {}", report.version);
    println!("   Tokens: {}", format_with_commas(metadata.token_count));
    println!("   Characters: {}", format_with_commas(metadata.character_count));
    println!("   Files: {}", metadata.file_count);
    println!("   Hash: {}", metadata.hash);

    Ok(())
}
