//! Gymprobe: page-object end-to-end suite for the Workouts fitness app
//!
//! Drives the Workouts web frontend the way a user would (sign in, start
//! and complete workouts, manage users, exercises and templates) and checks
//! what the UI shows after each step.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    GYMPROBE Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Page       │    │ Session    │            │
//! │   │ catalogue  │───►│ objects    │───►│ + Element  │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │         ▲                                   │ Surface           │
//! │   ┌─────┴──────┐                   ┌────────┴────────┐          │
//! │   │ TestHarness│                   ▼                 ▼          │
//! │   │ retries,   │            ┌────────────┐    ┌────────────┐    │
//! │   │ screenshots│            │ CdpSurface │    │ MockPage   │    │
//! │   └────────────┘            │ (chromium) │    │ (in-memory)│    │
//! │                             └────────────┘    └────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use gymprobe::mock::{MockBackend, MockSessionFactory};
//! use gymprobe::{scenario, Fixtures, SuiteConfig, TestHarness};
//!
//! let config = SuiteConfig::default();
//! let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
//! let results = TestHarness::from_config(&config)
//!     .run(&scenario::suite(), &factory, &config.fixtures())
//!     .await;
//! assert!(results.all_passed());
//! ```

#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod assertion;
mod browser;
mod config;
mod element;
mod fixture;
mod lifecycle;
mod locator;
mod page_object;
mod result;
mod session;
mod surface;

/// Scenario runner: suites, retries, per-attempt sessions and reports
pub mod harness;

/// In-memory Workouts application for browserless runs
pub mod mock;

/// One page object per screen of the app
pub mod pages;

/// The end-to-end scenario catalogue
pub mod scenario;

/// Polling waits shared by elements, assertions and URL checks
pub mod wait;

pub use assertion::{assert_url_matches, Expect};
pub use browser::{BrowserConfig, BrowserSessionFactory};
#[cfg(feature = "browser")]
pub use browser::{Browser, CdpSurface};
pub use config::{
    SuiteConfig, Viewport, DEFAULT_BASE_URL, DEFAULT_TEST_TIMEOUT_MS, ENV_BASE_URL,
    ENV_CHROMIUM_PATH, ENV_HEADLESS, ENV_RETRIES,
};
pub use element::{Element, ElementQuery};
pub use fixture::{
    Credential, Fixtures, UniqueIds, ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_USERNAME, REGULAR_EMAIL,
    REGULAR_PASSWORD,
};
pub use harness::{
    ScenarioCase, SessionFactory, SuiteResults, TestHarness, TestResult, TestSuite,
};
pub use lifecycle::WorkoutLifecycle;
pub use locator::{Locator, Nth, Role, SelectOption, Selector, TextMatch};
pub use page_object::PageObject;
pub use result::{FailureKind, GymError, GymResult};
pub use session::{path_of, Session};
pub use surface::{Probe, Surface};
pub use wait::{WaitOptions, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};

/// Gymprobe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
