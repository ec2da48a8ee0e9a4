//! repo-ingest: manage repository ingestion runs
//!
//! Wraps an external ingestion command, measures what it produced, and keeps
//! versioned artifacts plus their metadata next to a retention policy.

use anyhow::Result;

fn main() -> Result<()> {
    repo_ingest::cli::run()
}
