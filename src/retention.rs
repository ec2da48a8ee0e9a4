//! Retention cleanup for ingested artifacts
//!
//! Artifacts are grouped by the repository their name starts with and only
//! the newest `keep` per group (by modification time) survive. Deletion is
//! permanent.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const ARTIFACT_EXTENSION: &str = "md";

/// Number of artifacts kept per repository when not specified.
pub const DEFAULT_KEEP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<ArtifactFile>,
    /// Artifacts that could not be deleted, with the error message.
    pub failed: Vec<(ArtifactFile, String)>,
}

impl CleanReport {
    pub fn total_bytes(&self) -> u64 {
        self.removed.iter().map(|a| a.size).sum()
    }
}

/// All `*.md` files directly inside `output_dir`, sorted by name.
/// A missing directory has no artifacts.
pub fn list_artifacts(output_dir: &Path) -> Result<Vec<ArtifactFile>> {
    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION) {
            continue;
        }
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        artifacts.push(ArtifactFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size: meta.len(),
            modified: meta.modified()?,
        });
    }
    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artifacts)
}

/// Repository an artifact belongs to, derived from its file stem.
///
/// The longest configured repository name followed by `_` wins, so names
/// containing underscores group correctly. Otherwise the text before the
/// first `_` is used, which misgroups unknown repositories whose names
/// contain underscores.
pub fn repository_key(stem: &str, known_repos: &[&str]) -> String {
    let known = known_repos
        .iter()
        .filter(|repo| {
            stem.strip_prefix(**repo).is_some_and(|rest| rest.starts_with('_'))
        })
        .max_by_key(|repo| repo.len());

    match known {
        Some(repo) => (*repo).to_string(),
        None => stem.split('_').next().unwrap_or(stem).to_string(),
    }
}

/// Artifacts that `clean` would delete, without touching anything.
pub fn plan_clean(output_dir: &Path, keep: usize, known_repos: &[&str]) -> Result<Vec<ArtifactFile>> {
    let mut groups: BTreeMap<String, Vec<ArtifactFile>> = BTreeMap::new();
    for artifact in list_artifacts(output_dir)? {
        let stem = artifact.name.strip_suffix(".md").unwrap_or(&artifact.name);
        groups.entry(repository_key(stem, known_repos)).or_default().push(artifact);
    }

    let mut doomed = Vec::new();
    for (repo, mut files) in groups {
        // Newest first; name breaks ties so repeated runs pick the same files.
        files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
        let stale: Vec<ArtifactFile> = files.into_iter().skip(keep).collect();
        if !stale.is_empty() {
            tracing::debug!("{repo}: {} artifact(s) beyond the newest {keep}", stale.len());
        }
        doomed.extend(stale);
    }
    Ok(doomed)
}

/// Delete everything `plan_clean` selects.
pub fn clean(output_dir: &Path, keep: usize, known_repos: &[&str]) -> Result<CleanReport> {
    let doomed = plan_clean(output_dir, keep, known_repos)?;
    Ok(remove_artifacts(doomed))
}

/// Delete each artifact, carrying on past failures so the report covers
/// everything that was actually freed.
pub fn remove_artifacts(artifacts: Vec<ArtifactFile>) -> CleanReport {
    let mut report = CleanReport::default();
    for artifact in artifacts {
        tracing::info!("Removing {} ({} bytes)", artifact.name, artifact.size);
        match fs::remove_file(&artifact.path) {
            Ok(()) => report.removed.push(artifact),
            Err(e) => {
                tracing::warn!("Could not remove {}: {}", artifact.path.display(), e);
                report.failed.push((artifact, e.to_string()));
            }
        }
    }
    report
}
