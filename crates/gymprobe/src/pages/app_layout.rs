//! Navigation bar shared by every authenticated screen.

use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::result::GymResult;
use crate::session::Session;

/// Top navigation of the authenticated shell
#[derive(Debug, Clone, Copy)]
pub struct AppLayout<'s> {
    session: &'s Session,
}

impl<'s> AppLayout<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    /// Navigation link by its visible name
    pub fn nav_link(&self, name: &str) -> Locator {
        Locator::role(Role::Link, TextMatch::exact(name))
    }

    pub fn logout_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("logout"))
    }

    async fn follow(&self, link: &str, url_pattern: &str) -> GymResult<()> {
        tracing::debug!(link, "navigate");
        self.session.locate(self.nav_link(link)).click().await?;
        self.session.expect_url(url_pattern).await
    }

    pub async fn go_to_dashboard(&self) -> GymResult<()> {
        self.follow("Dashboard", "/dashboard").await
    }

    pub async fn go_to_profile(&self) -> GymResult<()> {
        self.follow("Profile", "/profile").await
    }

    pub async fn go_to_workouts(&self) -> GymResult<()> {
        self.follow("Workouts", "/workouts").await
    }

    pub async fn go_to_history(&self) -> GymResult<()> {
        self.follow("History", "/history").await
    }

    /// Only rendered for administrators
    pub async fn go_to_admin(&self) -> GymResult<()> {
        self.follow("Admin", "/admin").await
    }

    pub async fn logout(&self) -> GymResult<()> {
        tracing::info!("logout");
        self.session.locate(self.logout_button()).click().await
    }
}
