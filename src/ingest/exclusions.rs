//! Exclusion pattern resolution

use crate::domain::{Config, RepoConfig};

/// Repository patterns followed by the profile's additional patterns.
///
/// An unknown profile contributes nothing; it is not treated as an error.
/// Order is preserved because some ingestion tools apply first-match-wins.
pub fn resolve_exclusions(config: &Config, repo: &RepoConfig, profile: &str) -> Vec<String> {
    let mut exclusions = repo.exclusions.clone();

    match config.profiles.get(profile) {
        Some(profile_config) => {
            exclusions.extend(profile_config.additional_exclusions.iter().cloned());
        }
        None => tracing::debug!("Profile '{profile}' is not configured; no extra exclusions"),
    }

    exclusions
}
