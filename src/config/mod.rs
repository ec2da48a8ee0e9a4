//! Configuration store
//!
//! Loads and rewrites the whole configuration document. There is no locking:
//! a single writer is assumed, and two concurrent invocations racing on the
//! same file keep whichever save lands last.

pub mod loader;

pub use loader::{load_config, save_config, ConfigFormat};

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gitingest.yaml";
