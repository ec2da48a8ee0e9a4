//! Ingestion history log
//!
//! A single JSON array rewritten in full on every append. Like the
//! configuration file it assumes one writer at a time.

use crate::domain::LogEntry;
use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Raw records currently in the log; empty if the file is absent or unreadable.
///
/// Records are kept as JSON values so entries written by other versions
/// survive a rewrite untouched.
fn read_raw(log_file: &Path) -> Vec<Value> {
    let content = match fs::read_to_string(log_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read ingestion log {}: {}", log_file.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Ingestion log {} is not a JSON array, starting fresh: {}", log_file.display(), e);
            Vec::new()
        }
    }
}

/// Entries in the log that parse as [`LogEntry`], oldest first.
pub fn read_log(log_file: &Path) -> Vec<LogEntry> {
    read_raw(log_file)
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

pub fn append_log(log_file: &Path, entry: &LogEntry) -> Result<()> {
    let mut entries = read_raw(log_file);
    entries.push(serde_json::to_value(entry)?);

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(log_file, serde_json::to_string_pretty(&entries)?)?;
    tracing::debug!("Appended {} to {}", entry.file, log_file.display());
    Ok(())
}
