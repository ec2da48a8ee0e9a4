//! Listing commands

use anyhow::Result;
use chrono::{DateTime, Local};
use console::style;

use crate::domain::Config;
use crate::retention::list_artifacts;
use crate::utils::format_with_commas;

pub fn repos(config: &Config) -> Result<()> {
    println!("\n{}", style("=== Configured Repositories ===").bold());
    for (name, repo) in &config.repositories {
        println!("\n{}:", style(name).cyan());
        let description = if repo.description.is_empty() { "N/A" } else { repo.description.as_str() };
        println!("  Description: {description}");
        println!("  Source: {}", repo.source);
        println!("  Exclusions: {} patterns", repo.exclusions.len());

        if let Some(metadata) = &repo.metadata {
            println!("  Last ingested: {}", metadata.last_updated.format("%Y-%m-%d %H:%M:%S"));
            println!("  Last profile: {}", metadata.profile);
            println!("  Last file: {}", metadata.last_file);
            println!("  Tokens: {}", format_with_commas(metadata.token_count));
            println!("  Characters: {}", format_with_commas(metadata.character_count));
        }
    }
    Ok(())
}

pub fn profiles(config: &Config) -> Result<()> {
    println!("\n{}", style("=== Available Profiles ===").bold());
    for (name, profile) in &config.profiles {
        println!("\n{}:", style(name).cyan());
        println!("  Description: {}", profile.description);
        println!("  Additional exclusions: {}", profile.additional_exclusions.len());
    }
    Ok(())
}

pub fn ingested(config: &Config) -> Result<()> {
    let output_dir = &config.settings.output_dir;
    println!("\n{}", style(format!("=== Ingested Files in {} ===", output_dir.display())).bold());

    let artifacts = list_artifacts(output_dir)?;
    if artifacts.is_empty() {
        println!("No ingested files found.");
        return Ok(());
    }

    for artifact in artifacts {
        let size_mb = artifact.size as f64 / (1024.0 * 1024.0);
        let modified: DateTime<Local> = artifact.modified.into();
        println!("\n{}:", artifact.name);
        println!("  Size: {size_mb:.2} MB ({} bytes)", format_with_commas(artifact.size));
        println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}
