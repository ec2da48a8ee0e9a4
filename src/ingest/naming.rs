//! Artifact naming

use crate::domain::COMPACT_TIMESTAMP_FORMAT;
use crate::utils::format_token_count;
use chrono::{DateTime, Local};

/// Marker counted as "one file" in the ingestion output.
const CODE_BLOCK_MARKER: &str = "\n```";

/// `{repo}_temp_{YYYYmmdd_HHMMSS}.md`.
///
/// Second granularity: two runs for the same repository within one second
/// get the same name.
pub fn temp_file_name(repo_name: &str, started: &DateTime<Local>) -> String {
    format!("{repo_name}_temp_{}.md", started.format(COMPACT_TIMESTAMP_FORMAT))
}

/// `{repo}_{version}_{human tokens}.md`, the artifact's natural key.
pub fn artifact_file_name(repo_name: &str, version: &str, token_count: u64) -> String {
    format!("{repo_name}_{version}_{}.md", format_token_count(token_count))
}

/// Approximate number of source files represented in an ingestion output,
/// counted as newline-prefixed code fences.
pub fn count_code_blocks(content: &str) -> u64 {
    content.matches(CODE_BLOCK_MARKER).count() as u64
}
