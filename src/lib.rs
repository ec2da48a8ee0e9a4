//! Library half of `repo-ingest`.
//!
//! The binary is a thin clap front end over these modules; everything that
//! touches the filesystem or external processes lives here so it can be
//! exercised from tests.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod ingest;
pub mod retention;
pub mod utils;

pub use error::IngestError;
