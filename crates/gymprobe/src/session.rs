//! Session: one isolated page plus the suite's wait policy.
//!
//! A session is the `page` fixture of a scenario. It is created fresh for
//! every attempt and closed afterwards, so no browser state leaks between
//! scenarios.

use std::sync::Arc;

use regex::Regex;

use crate::assertion::Expect;
use crate::config::SuiteConfig;
use crate::element::Element;
use crate::locator::Locator;
use crate::result::{GymError, GymResult};
use crate::surface::Surface;
use crate::wait::{poll_until, Check, WaitOptions, DEFAULT_NAVIGATION_TIMEOUT_MS};

/// A page bound to a base URL and wait policy
pub struct Session {
    surface: Arc<dyn Surface>,
    base_url: String,
    wait: WaitOptions,
    navigation: WaitOptions,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("wait", &self.wait)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session over a surface
    #[must_use]
    pub fn new(surface: Arc<dyn Surface>, base_url: impl Into<String>) -> Self {
        Self {
            surface,
            base_url: base_url.into(),
            wait: WaitOptions::default(),
            navigation: WaitOptions::default().with_timeout(DEFAULT_NAVIGATION_TIMEOUT_MS),
        }
    }

    /// Session using the timeouts and base URL of `config`
    #[must_use]
    pub fn from_config(surface: Arc<dyn Surface>, config: &SuiteConfig) -> Self {
        Self::new(surface, config.base_url.clone())
            .with_wait(config.wait_options())
            .with_navigation_timeout(config.navigation_timeout_ms)
    }

    /// Set the action/assertion wait policy
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout_ms: u64) -> Self {
        self.navigation = self.navigation.with_timeout(timeout_ms);
        self
    }

    /// Underlying surface
    #[must_use]
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Base URL paths are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Action/assertion wait policy
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Resolve a path against the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Bind a locator to this session's page
    #[must_use]
    pub fn locate(&self, locator: Locator) -> Element<'_> {
        Element::new(self.surface.as_ref(), locator, self.wait)
    }

    /// Start a web-first assertion
    #[must_use]
    pub fn expect(&self, locator: Locator) -> Expect<'_> {
        Expect::new(self.locate(locator))
    }

    /// Navigate to `path` (relative to the base URL)
    ///
    /// # Errors
    ///
    /// [`GymError::Navigation`] if the page does not load in time
    pub async fn goto(&self, path: &str) -> GymResult<()> {
        let url = self.url_for(path);
        tracing::debug!(%url, "goto");
        match tokio::time::timeout(self.navigation.timeout(), self.surface.navigate(&url)).await {
            Ok(result) => result,
            Err(_) => Err(GymError::Navigation {
                url,
                message: format!("timed out after {}ms", self.navigation.timeout_ms),
            }),
        }
    }

    /// Current absolute URL
    ///
    /// # Errors
    ///
    /// Returns error if the surface cannot report it
    pub async fn current_url(&self) -> GymResult<String> {
        self.surface.current_url().await
    }

    /// Wait until the URL matches `pattern` (a regex searched in the full URL)
    ///
    /// # Errors
    ///
    /// [`GymError::AssertionFailed`] on timeout
    pub async fn expect_url(&self, pattern: &str) -> GymResult<()> {
        self.wait_for_url(pattern, true).await
    }

    /// Wait until the URL no longer matches `pattern`
    ///
    /// # Errors
    ///
    /// [`GymError::AssertionFailed`] on timeout
    pub async fn expect_url_not(&self, pattern: &str) -> GymResult<()> {
        self.wait_for_url(pattern, false).await
    }

    async fn wait_for_url(&self, pattern: &str, should_match: bool) -> GymResult<()> {
        let re = Regex::new(pattern).map_err(|e| GymError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        let re = &re;
        let surface = self.surface.as_ref();
        let expectation = if should_match {
            format!("URL matching /{pattern}/")
        } else {
            format!("URL not matching /{pattern}/")
        };
        poll_until(&self.wait, &expectation, move || async move {
            let url = surface.current_url().await?;
            if re.is_match(&url) == should_match {
                Ok(Check::Ready(()))
            } else {
                Ok(Check::pending(url))
            }
        })
        .await
        .map_err(|e| match e {
            GymError::Timeout { ms, observed, .. } => GymError::assertion(format!(
                "expected {expectation} within {ms}ms, page is at {observed}"
            )),
            other => other,
        })
    }

    /// PNG screenshot of the page
    ///
    /// # Errors
    ///
    /// Returns error if capture fails
    pub async fn screenshot(&self) -> GymResult<Vec<u8>> {
        self.surface.screenshot().await
    }

    /// Close the page
    ///
    /// # Errors
    ///
    /// Returns error if the surface fails to close
    pub async fn close(&self) -> GymResult<()> {
        self.surface.close().await
    }
}

/// Path component of an absolute URL (`/` when there is none)
#[must_use]
pub fn path_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    match rest.find('/') {
        Some(i) => {
            let path = &rest[i..];
            path.split(['?', '#']).next().unwrap_or(path)
        }
        None => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_of() {
        assert_eq!(path_of("http://localhost:5173/dashboard"), "/dashboard");
        assert_eq!(path_of("http://localhost:5173/workout/3?x=1"), "/workout/3");
        assert_eq!(path_of("http://localhost:5173"), "/");
        assert_eq!(path_of("/history#top"), "/history");
    }
}
