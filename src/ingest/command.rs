//! External ingestion command construction and execution

use crate::error::{IngestError, Result};
use std::path::Path;
use std::process::{Command, Output};

/// A fully resolved invocation of the ingestion binary.
///
/// Contract: `<binary> <source> -o <output> [-s <max_size>] [-e <pattern>]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl IngestCommand {
    pub fn build(
        program: &str,
        source: &str,
        output_path: &Path,
        exclusions: &[String],
        max_size: Option<u64>,
    ) -> Self {
        let mut args = vec![source.to_string(), "-o".to_string(), output_path.display().to_string()];

        if let Some(size) = max_size {
            args.push("-s".to_string());
            args.push(size.to_string());
        }

        for pattern in exclusions {
            args.push("-e".to_string());
            args.push(pattern.clone());
        }

        Self { program: program.to_string(), args }
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone()).chain(self.args.iter().cloned()).collect()
    }

    pub fn display(&self) -> String {
        self.argv().join(" ")
    }

    /// Run to completion, capturing output. A non-zero exit is an error
    /// carrying the command's stderr.
    pub fn run(&self) -> Result<Output> {
        tracing::debug!("Running: {}", self.display());

        let output = Command::new(&self.program).args(&self.args).output().map_err(|e| {
            IngestError::ExternalCommandFailure {
                command: self.display(),
                status: "failed to start".to_string(),
                stderr: e.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(IngestError::ExternalCommandFailure {
                command: self.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}
