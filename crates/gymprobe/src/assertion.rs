//! Assertions for test validation.
//!
//! `Expect` is the web-first counterpart of an `assert!`: it keeps polling
//! until the condition holds and only then fails, naming the expectation
//! and the last state it saw.

use crate::element::{Element, ElementQuery};
use crate::result::{GymError, GymResult};
use crate::wait::{poll_until, Check};

/// Web-first assertions on an element
#[derive(Debug, Clone)]
pub struct Expect<'s> {
    element: Element<'s>,
}

impl<'s> Expect<'s> {
    /// Wrap an element handle
    #[must_use]
    pub const fn new(element: Element<'s>) -> Self {
        Self { element }
    }

    /// Element must become uniquely visible
    ///
    /// # Errors
    ///
    /// [`GymError::AssertionFailed`] on timeout; strict-mode violations pass
    /// through unchanged
    pub async fn to_be_visible(&self) -> GymResult<()> {
        self.element
            .wait_visible()
            .await
            .map_err(|e| self.describe(e, "to be visible"))
    }

    /// No matching element may be visible
    ///
    /// # Errors
    ///
    /// [`GymError::AssertionFailed`] on timeout
    pub async fn to_be_hidden(&self) -> GymResult<()> {
        self.element
            .wait_hidden()
            .await
            .map_err(|e| self.describe(e, "to be hidden"))
    }

    /// Match count must settle on `expected`
    ///
    /// # Errors
    ///
    /// [`GymError::AssertionFailed`] on timeout
    pub async fn to_have_count(&self, expected: usize) -> GymResult<()> {
        let element = &self.element;
        let what = format!("{} to have count {expected}", element.locator());
        poll_until(element.wait_options(), &what, move || async move {
            let count = element.count().await?;
            if count == expected {
                Ok(Check::Ready(()))
            } else {
                Ok(Check::pending(format!("{count} match(es)")))
            }
        })
        .await
        .map_err(|e| self.describe(e, &format!("to have count {expected}")))
    }

    fn describe(&self, err: GymError, condition: &str) -> GymError {
        match err {
            GymError::Timeout { ms, observed, .. } => GymError::assertion(format!(
                "expected {} {condition} within {ms}ms, last observed {observed}",
                self.element.locator()
            )),
            other => other,
        }
    }
}

/// Assert that a URL matches `pattern`, without waiting
///
/// # Errors
///
/// [`GymError::InvalidPattern`] if the pattern does not compile,
/// [`GymError::AssertionFailed`] if the URL does not match
pub fn assert_url_matches(url: &str, pattern: &str) -> GymResult<()> {
    let re = regex::Regex::new(pattern).map_err(|e| GymError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    if re.is_match(url) {
        Ok(())
    } else {
        Err(GymError::assertion(format!(
            "expected URL matching /{pattern}/, got {url}"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_matches() {
        assert!(assert_url_matches("http://localhost:5173/dashboard", r"/dashboard").is_ok());
        let err = assert_url_matches("http://localhost:5173/login", r"/dashboard").unwrap_err();
        assert!(err.to_string().contains("/login"));
    }

    #[test]
    fn test_bad_url_pattern() {
        let err = assert_url_matches("http://x", "(").unwrap_err();
        assert!(matches!(err, GymError::InvalidPattern { .. }));
    }
}
