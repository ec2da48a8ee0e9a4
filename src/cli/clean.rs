//! Clean command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

use crate::domain::Config;
use crate::retention::{plan_clean, remove_artifacts, DEFAULT_KEEP};
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct CleanArgs {
    /// Number of artifacts to keep per repository
    #[arg(short = 'k', long, value_name = "N", default_value_t = DEFAULT_KEEP)]
    pub keep: usize,

    /// Show what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation on an interactive terminal
    #[arg(short = 'y', long)]
    pub yes: bool,
}

pub fn run(config: &Config, args: CleanArgs) -> Result<()> {
    println!(
        "\n{}",
        style(format!("=== Cleaning old files (keeping latest {} per repo) ===", args.keep)).bold()
    );

    let known_repos: Vec<&str> = config.repositories.keys().map(String::as_str).collect();
    let doomed = plan_clean(&config.settings.output_dir, args.keep, &known_repos)?;

    for artifact in &doomed {
        println!("  Removing: {} ({} bytes)", artifact.name, format_with_commas(artifact.size));
    }

    if doomed.is_empty() {
        println!("\nNothing to remove.");
        return Ok(());
    }

    if args.dry_run {
        println!("\nDry run: {} file(s) would be removed.", doomed.len());
        return Ok(());
    }

    if !args.yes && std::io::stdin().is_terminal() {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Permanently delete {} file(s)?", doomed.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let report = remove_artifacts(doomed);
    println!(
        "\n{} Removed {} files ({} bytes)",
        style("✅").green(),
        report.removed.len(),
        format_with_commas(report.total_bytes())
    );

    if !report.failed.is_empty() {
        for (artifact, reason) in &report.failed {
            println!("  {} {}: {reason}", style("Failed:").red(), artifact.name);
        }
        anyhow::bail!("{} file(s) could not be removed", report.failed.len());
    }
    Ok(())
}
