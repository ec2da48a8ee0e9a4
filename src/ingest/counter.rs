//! Token counter adapter
//!
//! Delegates to an external counting utility (`<binary> <file>`, first
//! whitespace-delimited stdout token is the count). Any trouble with the
//! utility degrades to the `chars / 4` estimate; only reading the artifact
//! itself can fail.

use crate::domain::{Outcome, Settings};
use crate::error::Result;
use crate::utils::{estimate_tokens, expand_env_vars, read_text_strict};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCount {
    pub tokens: u64,
    /// Unicode code points in the decoded text. Always measured locally.
    pub characters: u64,
}

#[derive(Debug, Clone)]
pub struct TokenCounter {
    program: PathBuf,
}

impl TokenCounter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(expand_env_vars(&settings.token_counter))
    }

    pub fn count(&self, file: &Path) -> Result<Outcome<TokenCount>> {
        let text = read_text_strict(file)?;
        Ok(self.count_text(file, &text))
    }

    /// Count using text already decoded from `file`.
    pub fn count_text(&self, file: &Path, text: &str) -> Outcome<TokenCount> {
        let characters = text.chars().count() as u64;
        let estimate = TokenCount { tokens: estimate_tokens(characters), characters };

        if self.program.as_os_str().is_empty() || !self.program.exists() {
            return Outcome::degraded(
                estimate,
                format!("Token counter not found at {}", self.program.display()),
            );
        }

        match self.run_counter(file) {
            Ok(tokens) => Outcome::Measured(TokenCount { tokens, characters }),
            Err(reason) => Outcome::degraded(estimate, reason),
        }
    }

    fn run_counter(&self, file: &Path) -> std::result::Result<u64, String> {
        let output = Command::new(&self.program)
            .arg(file)
            .output()
            .map_err(|e| format!("Error running token counter: {e}"))?;

        if !output.status.success() {
            return Err(format!(
                "Error running token counter ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_counter_output(&stdout)
            .ok_or_else(|| format!("Unable to parse token counter output: {:?}", stdout.trim()))
    }
}

/// Leading integer of the counter's stdout, e.g. `"1234 file.md"` -> 1234.
pub fn parse_counter_output(stdout: &str) -> Option<u64> {
    stdout.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_counter_output("1234 /tmp/file.md\n"), Some(1234));
        assert_eq!(parse_counter_output("  42\n"), Some(42));
    }

    #[test]
    fn rejects_unparseable_output() {
        assert_eq!(parse_counter_output(""), None);
        assert_eq!(parse_counter_output("tokens: 12"), None);
        assert_eq!(parse_counter_output("-5 file"), None);
    }

    #[test]
    fn missing_counter_falls_back_to_estimate() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("artifact.md");
        fs::write(&file, "a".repeat(4001)).expect("write");

        let counter = TokenCounter::new(tmp.path().join("no-such-counter"));
        let outcome = counter.count(&file).expect("count");
        assert!(outcome.is_degraded());
        assert!(outcome.reason().unwrap_or_default().contains("not found"));
        assert_eq!(outcome.into_value(), TokenCount { tokens: 1000, characters: 4001 });
    }

    #[test]
    fn empty_counter_path_is_treated_as_missing() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("artifact.md");
        fs::write(&file, "héllo wörld").expect("write");

        let outcome = TokenCounter::new("").count(&file).expect("count");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), TokenCount { tokens: 2, characters: 11 });
    }

    #[cfg(unix)]
    mod with_stub_counter {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn stub(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("tc");
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
            path
        }

        fn artifact(dir: &Path) -> PathBuf {
            let file = dir.join("artifact.md");
            fs::write(&file, "x".repeat(4000)).expect("write");
            file
        }

        #[test]
        fn uses_counter_tokens_and_local_characters() {
            let tmp = TempDir::new().expect("tmp");
            let counter = TokenCounter::new(stub(tmp.path(), "echo \"777 $1\""));
            let outcome = counter.count(&artifact(tmp.path())).expect("count");
            assert_eq!(outcome, Outcome::Measured(TokenCount { tokens: 777, characters: 4000 }));
        }

        #[test]
        fn non_zero_exit_degrades_with_stderr() {
            let tmp = TempDir::new().expect("tmp");
            let counter = TokenCounter::new(stub(tmp.path(), "echo 'model missing' >&2; exit 3"));
            let outcome = counter.count(&artifact(tmp.path())).expect("count");
            assert!(outcome.reason().unwrap_or_default().contains("model missing"));
            assert_eq!(outcome.into_value().tokens, 1000);
        }

        #[test]
        fn malformed_output_degrades_instead_of_failing() {
            let tmp = TempDir::new().expect("tmp");
            let counter = TokenCounter::new(stub(tmp.path(), "echo 'lots of tokens'"));
            let outcome = counter.count(&artifact(tmp.path())).expect("count");
            assert!(outcome.is_degraded());
            assert_eq!(outcome.into_value(), TokenCount { tokens: 1000, characters: 4000 });
        }
    }
}
