//! Element handles: a locator bound to a surface.
//!
//! Handles are cheap and re-resolve on every call, so a handle obtained
//! before a navigation is still valid after it.

use async_trait::async_trait;

use crate::locator::{Locator, SelectOption};
use crate::result::{GymError, GymResult};
use crate::surface::{Probe, Surface};
use crate::wait::{poll_until, Check, WaitOptions};

/// Operations page objects perform on an element
#[async_trait]
pub trait ElementQuery: Send + Sync {
    /// Current number of matches (zero is not an error)
    async fn count(&self) -> GymResult<usize>;

    /// Whether the single match is visible right now
    async fn is_visible(&self) -> GymResult<bool>;

    /// Wait until exactly one visible element matches
    async fn wait_visible(&self) -> GymResult<()>;

    /// Wait until no visible element matches
    async fn wait_hidden(&self) -> GymResult<()>;

    /// Wait, then click
    async fn click(&self) -> GymResult<()>;

    /// Wait, then replace the value
    async fn fill(&self, value: &str) -> GymResult<()>;

    /// Wait, then choose an option
    async fn select_option(&self, option: SelectOption) -> GymResult<()>;

    /// Wait, then check
    async fn check(&self) -> GymResult<()>;
}

/// A [`Locator`] bound to a [`Surface`] with a wait policy
#[derive(Clone)]
pub struct Element<'s> {
    surface: &'s dyn Surface,
    locator: Locator,
    wait: WaitOptions,
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("locator", &self.locator.to_string())
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl<'s> Element<'s> {
    /// Bind a locator; a locator-level timeout overrides `wait`
    #[must_use]
    pub fn new(surface: &'s dyn Surface, locator: Locator, wait: WaitOptions) -> Self {
        let wait = match locator.timeout_ms() {
            Some(ms) => wait.with_timeout(ms),
            None => wait,
        };
        Self {
            surface,
            locator,
            wait,
        }
    }

    /// Get the locator
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Effective wait options
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Narrow to the first match
    #[must_use]
    pub fn first(mut self) -> Self {
        self.locator = self.locator.first();
        self
    }

    /// Override the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.wait = self.wait.with_timeout(timeout_ms);
        self
    }

    /// Resolve once without waiting
    ///
    /// # Errors
    ///
    /// Returns error if the surface cannot be queried
    pub async fn probe(&self) -> GymResult<Probe> {
        self.surface.probe(&self.locator).await
    }

    fn strict_violation(&self, count: usize) -> GymError {
        GymError::StrictModeViolation {
            locator: self.locator.to_string(),
            count,
        }
    }

    async fn wait_actionable(&self) -> GymResult<()> {
        let surface = self.surface;
        let locator = &self.locator;
        let what = format!("{locator} to be visible");
        poll_until(&self.wait, &what, move || async move {
            let probe = surface.probe(locator).await?;
            if probe.count > 1 {
                return Err(GymError::StrictModeViolation {
                    locator: locator.to_string(),
                    count: probe.count,
                });
            }
            if probe.is_unique_visible() {
                Ok(Check::Ready(()))
            } else {
                Ok(Check::pending(probe.to_string()))
            }
        })
        .await
    }
}

#[async_trait]
impl ElementQuery for Element<'_> {
    async fn count(&self) -> GymResult<usize> {
        Ok(self.probe().await?.count)
    }

    async fn is_visible(&self) -> GymResult<bool> {
        let probe = self.probe().await?;
        if probe.count > 1 {
            return Err(self.strict_violation(probe.count));
        }
        Ok(probe.visible == 1)
    }

    async fn wait_visible(&self) -> GymResult<()> {
        self.wait_actionable().await
    }

    async fn wait_hidden(&self) -> GymResult<()> {
        let surface = self.surface;
        let locator = &self.locator;
        let what = format!("{locator} to be hidden");
        poll_until(&self.wait, &what, move || async move {
            let probe = surface.probe(locator).await?;
            if probe.visible == 0 {
                Ok(Check::Ready(()))
            } else {
                Ok(Check::pending(probe.to_string()))
            }
        })
        .await
    }

    async fn click(&self) -> GymResult<()> {
        self.wait_actionable().await?;
        tracing::debug!(locator = %self.locator, "click");
        self.surface.click(&self.locator).await
    }

    async fn fill(&self, value: &str) -> GymResult<()> {
        self.wait_actionable().await?;
        tracing::debug!(locator = %self.locator, len = value.len(), "fill");
        self.surface.fill(&self.locator, value).await
    }

    async fn select_option(&self, option: SelectOption) -> GymResult<()> {
        self.wait_actionable().await?;
        tracing::debug!(locator = %self.locator, %option, "select");
        self.surface.select_option(&self.locator, &option).await
    }

    async fn check(&self) -> GymResult<()> {
        self.wait_actionable().await?;
        tracing::debug!(locator = %self.locator, "check");
        self.surface.check(&self.locator).await
    }
}
