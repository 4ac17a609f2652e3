//! Surface: the driver seam between page objects and a live page.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Surface (async trait)                                        │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────────┐  ┌────────────────────────────┐ │
//! │  │  CdpSurface              │  │  MockPage                  │ │
//! │  │  chromiumoxide page +    │  │  in-memory Workouts app    │ │
//! │  │  injected resolver.js    │  │  rendered as a node tree   │ │
//! │  └──────────────────────────┘  └────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Surfaces resolve locators but do not wait; auto-waiting and strictness
//! live in [`crate::element::Element`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::{Locator, SelectOption};
use crate::result::GymResult;

/// Snapshot of how a locator currently resolves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    /// Number of matching elements
    pub count: usize,
    /// How many of them are visible
    pub visible: usize,
}

impl Probe {
    /// No matches
    pub const NONE: Self = Self {
        count: 0,
        visible: 0,
    };

    /// Exactly one visible match
    #[must_use]
    pub const fn is_unique_visible(&self) -> bool {
        self.count == 1 && self.visible == 1
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} match(es), {} visible", self.count, self.visible)
    }
}

/// A page the suite can drive.
///
/// Action methods act on the single element the locator resolves to and
/// fail if it resolves to zero or several.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Navigate to an absolute URL
    async fn navigate(&self, url: &str) -> GymResult<()>;

    /// Current absolute URL
    async fn current_url(&self) -> GymResult<String>;

    /// Count matches and visible matches
    async fn probe(&self, locator: &Locator) -> GymResult<Probe>;

    /// Click the element
    async fn click(&self, locator: &Locator) -> GymResult<()>;

    /// Replace the element's value
    async fn fill(&self, locator: &Locator, value: &str) -> GymResult<()>;

    /// Choose an option in a `<select>`
    async fn select_option(&self, locator: &Locator, option: &SelectOption) -> GymResult<()>;

    /// Check a checkbox or radio (no-op when already checked)
    async fn check(&self, locator: &Locator) -> GymResult<()>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> GymResult<Vec<u8>>;

    /// Release the page
    async fn close(&self) -> GymResult<()> {
        Ok(())
    }
}
