//! The ingest run: command -> measure -> version -> rename -> persist.
//!
//! Side effects happen in this order: temporary file created, then either
//! deleted (any failure before the rename) or renamed to its final name,
//! then the configuration rewritten, then the history log rewritten. Nothing
//! is rolled back if the process dies between the rename and the two writes;
//! the artifact then exists without metadata pointing at it.

use crate::config::save_config;
use crate::domain::{Config, IngestMetadata, LogEntry, DEFAULT_PROFILE};
use crate::error::{IngestError, Result};
use crate::history::append_log;
use crate::ingest::naming::{artifact_file_name, count_code_blocks, temp_file_name};
use crate::ingest::{resolve_exclusions, IngestCommand, TokenCounter, VersionResolver};
use crate::utils::{read_text_strict, short_content_hash};
use chrono::{Local, SubsecRound};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest<'a> {
    pub repo_name: &'a str,
    pub profile: &'a str,
    /// Skips the release lookup when set.
    pub version: Option<&'a str>,
}

impl<'a> IngestRequest<'a> {
    pub fn new(repo_name: &'a str) -> Self {
        Self { repo_name, profile: DEFAULT_PROFILE, version: None }
    }
}

#[derive(Debug, Clone)]
pub struct IngestReport {
    pub artifact: PathBuf,
    pub metadata: IngestMetadata,
    pub version: String,
    /// Whatever the ingestion command printed on stdout.
    pub command_output: String,
    /// Reasons for every step that fell back to an estimate or sentinel.
    pub warnings: Vec<String>,
}

/// Temporary ingestion output, removed on drop unless moved into place.
struct TempArtifact {
    path: PathBuf,
    committed: bool,
}

impl TempArtifact {
    fn new(path: PathBuf) -> Self {
        Self { path, committed: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn commit_to(mut self, final_path: &Path) -> Result<()> {
        move_file(&self.path, final_path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if !self.committed && self.path.exists() {
            tracing::debug!("Removing temporary output {}", self.path.display());
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("Could not remove temporary output {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Rename, falling back to copy + delete when the rename itself fails
/// (for example across filesystems).
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!("Rename {} failed ({rename_err}); copying instead", from.display());
            fs::copy(from, to).map_err(|_| rename_err)?;
            fs::remove_file(from)
        }
    }
}

fn run_with_spinner(command: &IngestCommand, repo_name: &str) -> Result<Output> {
    let spinner = if std::io::stderr().is_terminal() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Ingesting {repo_name}"));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = command.run();
    spinner.finish_and_clear();
    result
}

/// Run one ingestion for `request.repo_name` and persist its metadata.
///
/// `config` is updated in memory and written back to `config_path`.
pub fn ingest(
    config_path: &Path,
    config: &mut Config,
    request: &IngestRequest<'_>,
) -> Result<IngestReport> {
    let repo = config
        .repositories
        .get(request.repo_name)
        .cloned()
        .ok_or_else(|| IngestError::UnknownRepository(request.repo_name.to_string()))?;
    let settings = config.settings.clone();
    fs::create_dir_all(&settings.output_dir)?;

    let started = Local::now().trunc_subsecs(0);
    let temp = TempArtifact::new(settings.output_dir.join(temp_file_name(request.repo_name, &started)));
    if temp.path().exists() {
        tracing::warn!("Temporary output {} already exists and will be overwritten", temp.path().display());
    }

    let exclusions = resolve_exclusions(config, &repo, request.profile);
    let command = IngestCommand::build(
        settings.ingest_command(),
        &repo.source,
        temp.path(),
        &exclusions,
        settings.default_max_size,
    );
    tracing::info!("Running: {}", command.display());
    let output = run_with_spinner(&command, request.repo_name)?;

    let mut warnings = Vec::new();

    let text = read_text_strict(temp.path())?;
    let counted = TokenCounter::from_settings(&settings).count_text(temp.path(), &text);
    warnings.extend(counted.reason().map(str::to_string));
    let counts = counted.into_value_logged("Token counting");
    let file_count = count_code_blocks(&text);
    drop(text);

    // An empty label means "not supplied", not an empty name component.
    let explicit_version = request.version.map(str::trim).filter(|v| !v.is_empty());
    let version = match explicit_version {
        Some(explicit) => explicit.replace(['/', '\\'], "-"),
        None => {
            let resolved = VersionResolver::from_settings(&settings).resolve(Path::new(&repo.source));
            warnings.extend(resolved.reason().map(str::to_string));
            resolved.into_value_logged("Version lookup")
        }
    };

    let final_name = artifact_file_name(request.repo_name, &version, counts.tokens);
    let final_path = settings.output_dir.join(&final_name);
    if final_path.exists() {
        tracing::debug!("Replacing existing artifact {}", final_path.display());
    }
    temp.commit_to(&final_path)?;

    let metadata = IngestMetadata {
        last_updated: started,
        token_count: counts.tokens,
        character_count: counts.characters,
        file_count,
        last_file: final_name,
        profile: request.profile.to_string(),
        hash: short_content_hash(&fs::read(&final_path)?),
    };

    if let Some(repo_config) = config.repositories.get_mut(request.repo_name) {
        repo_config.metadata = Some(metadata.clone());
    }
    save_config(config_path, config)?;
    append_log(&settings.log_path(), &LogEntry::from_metadata(request.repo_name, &metadata))?;

    Ok(IngestReport {
        artifact: final_path,
        metadata,
        version,
        command_output: String::from_utf8_lossy(&output.stdout).into_owned(),
        warnings,
    })
}
