//! Release version lookup
//!
//! Reads `origin` of the local checkout, and when it points at GitHub asks the
//! releases API for the latest tag. Every failure degrades to `"latest"`.

use crate::domain::{Outcome, Settings};
use git2::Repository;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Version label used whenever the lookup fails.
pub const FALLBACK_VERSION: &str = "latest";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);
const GITHUB_HOST: &str = "github.com";

#[derive(Debug, Deserialize)]
struct LatestRelease {
    #[serde(default)]
    tag_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VersionResolver {
    api_base: String,
    /// `None` when the client could not be built; every lookup then degrades.
    client: Option<Client>,
}

impl VersionResolver {
    pub fn new(api_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| tracing::warn!("Could not build HTTP client: {e}"))
            .ok();
        Self { api_base: api_base.into().trim_end_matches('/').to_string(), client }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.version_api_base())
    }

    pub fn resolve(&self, repo_path: &Path) -> Outcome<String> {
        match self.lookup(repo_path) {
            Ok(version) => Outcome::Measured(version),
            Err(reason) => Outcome::degraded(FALLBACK_VERSION.to_string(), reason),
        }
    }

    fn lookup(&self, repo_path: &Path) -> Result<String, String> {
        let remote_url = read_origin_url(repo_path)?;
        let (owner, repo) = parse_github_remote(&remote_url)
            .ok_or_else(|| format!("Remote {remote_url} is not a GitHub repository"))?;
        let tag = self.fetch_latest_tag(&owner, &repo)?;
        let version = clean_release_tag(&tag);
        if version.is_empty() {
            return Err(format!("Latest release of {owner}/{repo} has no tag"));
        }
        Ok(version)
    }

    fn fetch_latest_tag(&self, owner: &str, repo: &str) -> Result<String, String> {
        let api_url = format!("{}/repos/{owner}/{repo}/releases/latest", self.api_base);
        tracing::debug!("Fetching {api_url}");

        let client = self.client.as_ref().ok_or_else(|| "No HTTP client available".to_string())?;

        let response = client
            .get(&api_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| format!("Could not fetch GitHub release: {e}"))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(format!("GitHub release lookup returned {}", response.status()));
        }

        let release: LatestRelease =
            response.json().map_err(|e| format!("Malformed GitHub release response: {e}"))?;
        Ok(release.tag_name.unwrap_or_default())
    }
}

/// `remote.origin.url` of the repository containing `path`.
pub fn read_origin_url(path: &Path) -> Result<String, String> {
    let repo = Repository::discover(path)
        .map_err(|e| format!("{} is not a git repository: {}", path.display(), e.message()))?;
    let remote = repo.find_remote("origin").map_err(|e| format!("No origin remote: {}", e.message()))?;
    remote.url().map(str::to_string).ok_or_else(|| "Origin remote URL is not valid UTF-8".to_string())
}

/// Owner and repository name from a GitHub remote URL.
///
/// Handles `https://github.com/owner/repo(.git)` and
/// `git@github.com:owner/repo(.git)`; the last two path segments are used.
pub fn parse_github_remote(url: &str) -> Option<(String, String)> {
    if !url.contains(GITHUB_HOST) {
        return None;
    }
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let mut segments = trimmed.rsplit(['/', ':']).filter(|s| !s.is_empty());
    let repo = segments.next()?;
    let owner = segments.next()?;
    if owner.contains(GITHUB_HOST) {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Strip a leading `v` and make the tag safe to embed in a file name.
pub fn clean_release_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.strip_prefix('v').unwrap_or(tag);
    tag.replace(['/', '\\'], "-")
}
