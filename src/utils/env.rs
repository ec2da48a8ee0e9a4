//! Environment variable expansion for configured paths

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").unwrap());

/// Expand `$VAR` and `${VAR}` references.
///
/// Unset variables are left untouched, so a missing `$HOME` shows up verbatim
/// in the "counter not found" warning instead of collapsing to an empty path.
pub fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_VAR
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or("");
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::expand_with;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/dev".to_string()),
            "TOOLS" => Some("/opt/tools".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_both_forms() {
        assert_eq!(expand_with("$HOME/bin/tc", lookup), "/home/dev/bin/tc");
        assert_eq!(expand_with("${TOOLS}/tc", lookup), "/opt/tools/tc");
    }

    #[test]
    fn leaves_unknown_variables_alone() {
        assert_eq!(expand_with("$NOPE/tc", lookup), "$NOPE/tc");
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand_with("/usr/local/bin/tc", lookup), "/usr/local/bin/tc");
    }
}
