//! Result type for best-effort steps.

/// Value produced by a step that may fall back instead of failing.
///
/// Fatal failures are still `Err`; this only distinguishes a measured value
/// from a substituted one, keeping the reason for the substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Measured(T),
    Degraded { fallback: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn degraded(fallback: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded { fallback, reason: reason.into() }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Measured(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Unwrap to the value, logging the reason when it was substituted.
    pub fn into_value_logged(self, step: &str) -> T {
        match self {
            Outcome::Measured(value) => value,
            Outcome::Degraded { fallback, reason } => {
                tracing::warn!("{step}: {reason}");
                fallback
            }
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Measured(value) | Outcome::Degraded { fallback: value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn degraded_keeps_reason_and_fallback() {
        let outcome = Outcome::degraded(7u64, "counter missing");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), Some("counter missing"));
        assert_eq!(outcome.into_value(), 7);
    }

    #[test]
    fn measured_has_no_reason() {
        let outcome = Outcome::Measured("1.2.0");
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
        assert_eq!(outcome.into_value_logged("version"), "1.2.0");
    }
}
