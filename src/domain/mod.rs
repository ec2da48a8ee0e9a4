//! Core data model: configuration document, per-run metadata, log records.

mod deserializers;
mod outcome;

pub use deserializers::COMPACT_TIMESTAMP_FORMAT;
pub use outcome::Outcome;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Ingestion binary used when `settings.ingest_command` is absent.
pub const DEFAULT_INGEST_COMMAND: &str = "gitingest";
/// Log file name inside the output directory when `settings.log_file` is absent.
pub const DEFAULT_LOG_FILE: &str = "ingestion_log.json";
/// Release API root used when `settings.version_api_base` is absent.
pub const DEFAULT_VERSION_API_BASE: &str = "https://api.github.com";
/// Profile applied when the caller does not name one.
pub const DEFAULT_PROFILE: &str = "standard";

/// Keys a user put in the document that this tool does not interpret.
/// Kept so a save does not silently drop them.
pub type ExtraFields = BTreeMap<String, serde_yaml::Value>;

/// The whole configuration document, loaded once and rewritten wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub settings: Settings,
    #[serde(default)]
    pub repositories: BTreeMap<String, RepoConfig>,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub output_dir: PathBuf,
    /// Path to the counting utility; may contain `$VAR` references.
    #[serde(default, alias = "token_counter_path")]
    pub token_counter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_api_base: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Settings {
    pub fn ingest_command(&self) -> &str {
        self.ingest_command.as_deref().unwrap_or(DEFAULT_INGEST_COMMAND)
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.output_dir.join(path),
            None => self.output_dir.join(DEFAULT_LOG_FILE),
        }
    }

    pub fn version_api_base(&self) -> &str {
        self.version_api_base.as_deref().unwrap_or(DEFAULT_VERSION_API_BASE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Local path or URL handed to the ingestion command.
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// Replaced wholesale after every successful ingest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IngestMetadata>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub additional_exclusions: Vec<String>,
}

/// Everything measured about one ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestMetadata {
    #[serde(deserialize_with = "deserializers::deserialize_local_timestamp")]
    pub last_updated: DateTime<Local>,
    pub token_count: u64,
    pub character_count: u64,
    pub file_count: u64,
    pub last_file: String,
    pub profile: String,
    pub hash: String,
}

/// One record in the ingestion history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "deserializers::deserialize_local_timestamp")]
    pub timestamp: DateTime<Local>,
    pub repository: String,
    pub profile: String,
    pub file: String,
    pub tokens: u64,
    pub characters: u64,
    pub files: u64,
    pub hash: String,
}

impl LogEntry {
    pub fn from_metadata(repository: &str, metadata: &IngestMetadata) -> Self {
        Self {
            timestamp: metadata.last_updated,
            repository: repository.to_string(),
            profile: metadata.profile.clone(),
            file: metadata.last_file.clone(),
            tokens: metadata.token_count,
            characters: metadata.character_count,
            files: metadata.file_count,
            hash: metadata.hash.clone(),
        }
    }
}
