//! In-memory Workouts application.
//!
//! A deterministic stand-in for the real frontend and API, exposing the same
//! roles, labels and texts the page objects look for. It lets the page
//! objects and scenarios run under `cargo test` and `gymprobe run --mock`
//! without a browser or a server.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gymprobe::mock::{MockBackend, MockSessionFactory};
//! use gymprobe::harness::SessionFactory;
//!
//! let factory = MockSessionFactory::new(MockBackend::seeded(), &SuiteConfig::default());
//! let session = factory.open().await?;
//! session.goto("/dashboard").await?;
//! session.expect_url("/login").await?;
//! ```

mod backend;
mod dom;
mod page;

use std::sync::Arc;

use async_trait::async_trait;

pub use backend::{Exercise, Id, MockBackend, NewUser, Template, User, Workout};
pub use dom::{Action, AdminTab, Control, Dom, Modal, Node};
pub use page::{MockPage, BLANK_PNG};

use crate::config::SuiteConfig;
use crate::harness::SessionFactory;
use crate::result::GymResult;
use crate::session::Session;

/// Opens a fresh [`MockPage`] per session over one shared backend
#[derive(Debug, Clone)]
pub struct MockSessionFactory {
    backend: MockBackend,
    config: SuiteConfig,
}

impl MockSessionFactory {
    /// Factory serving `backend` under the configured base URL
    #[must_use]
    pub fn new(backend: MockBackend, config: &SuiteConfig) -> Self {
        Self {
            backend,
            config: config.clone(),
        }
    }

    /// Shared backend
    #[must_use]
    pub const fn backend(&self) -> &MockBackend {
        &self.backend
    }

    /// Open a page and keep a typed handle to it
    #[must_use]
    pub fn open_page(&self) -> (Session, Arc<MockPage>) {
        let page = Arc::new(MockPage::new(
            self.backend.clone(),
            self.config.base_url.clone(),
        ));
        let session = Session::from_config(page.clone(), &self.config);
        (session, page)
    }
}

#[async_trait]
impl SessionFactory for MockSessionFactory {
    async fn open(&self) -> GymResult<Session> {
        let (session, _) = self.open_page();
        tracing::debug!(base_url = %self.config.base_url, "opened mock page");
        Ok(session)
    }
}
