//! Ingestion pipeline
//!
//! Runs the external ingestion command into a temporary file, measures the
//! result, names it after `{repo}_{version}_{tokens}.md`, and records what
//! happened in the configuration and the history log.

pub mod command;
pub mod counter;
pub mod exclusions;
pub mod naming;
pub mod pipeline;
pub mod version;

pub use command::IngestCommand;
pub use counter::{TokenCount, TokenCounter};
pub use exclusions::resolve_exclusions;
pub use pipeline::{ingest, IngestReport, IngestRequest};
pub use version::VersionResolver;
