//! Result and error types for gymprobe.

use serde::Serialize;
use thiserror::Error;

/// Result type for gymprobe operations
pub type GymResult<T> = Result<T, GymError>;

/// Errors raised while driving the application under test
#[derive(Debug, Error)]
pub enum GymError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page-level failure (script evaluation, target creation)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A wait did not resolve before its deadline
    #[error("Timed out after {ms}ms waiting for {what} (last observed: {observed})")]
    Timeout {
        /// Condition that was awaited
        what: String,
        /// Timeout in milliseconds
        ms: u64,
        /// Last state seen before giving up
        observed: String,
    },

    /// A locator expected to be unique matched several elements
    #[error("Strict mode violation: {locator} resolved to {count} elements")]
    StrictModeViolation {
        /// Locator description
        locator: String,
        /// Number of matches
        count: usize,
    },

    /// Click/fill/select/check failed on a resolved element
    #[error("Interaction with {locator} failed: {message}")]
    Interaction {
        /// Locator description
        locator: String,
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Operation called in the wrong state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Text or URL pattern failed to compile
    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// How a failed scenario should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An expected UI condition did not hold in time
    Assertion,
    /// A locator matched the wrong number of elements
    Ambiguity,
    /// Browser, server or local environment problem
    Environment,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Assertion => "assertion",
            Self::Ambiguity => "ambiguity",
            Self::Environment => "environment",
        };
        f.write_str(label)
    }
}

impl GymError {
    /// Build an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Build an invalid-state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Build a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify the error for reporting
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } | Self::AssertionFailed { .. } | Self::InvalidState { .. } => {
                FailureKind::Assertion
            }
            Self::StrictModeViolation { .. } => FailureKind::Ambiguity,
            Self::BrowserNotFound
            | Self::BrowserLaunch { .. }
            | Self::PageError { .. }
            | Self::Navigation { .. }
            | Self::Interaction { .. }
            | Self::InvalidPattern { .. }
            | Self::Config { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_) => FailureKind::Environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let timeout = GymError::Timeout {
            what: "heading \"Welcome back\"".into(),
            ms: 5000,
            observed: "0 matches".into(),
        };
        assert_eq!(timeout.kind(), FailureKind::Assertion);

        let strict = GymError::StrictModeViolation {
            locator: "role=button[name~\"Save\"]".into(),
            count: 2,
        };
        assert_eq!(strict.kind(), FailureKind::Ambiguity);

        let nav = GymError::Navigation {
            url: "http://localhost:5173/login".into(),
            message: "connection refused".into(),
        };
        assert_eq!(nav.kind(), FailureKind::Environment);
    }

    #[test]
    fn test_timeout_message_names_expectation_and_state() {
        let err = GymError::Timeout {
            what: "url matching /dashboard".into(),
            ms: 250,
            observed: "http://localhost:5173/login".into(),
        };
        let text = err.to_string();
        assert!(text.contains("250ms"));
        assert!(text.contains("/dashboard"));
        assert!(text.contains("/login"));
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Ambiguity.to_string(), "ambiguity");
    }
}
