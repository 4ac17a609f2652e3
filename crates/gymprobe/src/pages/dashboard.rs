use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

/// `/dashboard`, the landing screen after login
#[derive(Debug, Clone, Copy)]
pub struct DashboardPage<'s> {
    session: &'s Session,
}

impl<'s> DashboardPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn welcome_heading(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("welcome back"))
    }

    pub fn start_new_workout_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("start new workout"))
    }

    /// URL is `/dashboard` and the greeting is shown
    pub async fn expect_on_dashboard(&self) -> GymResult<()> {
        self.expect_on_page().await?;
        self.session.expect(self.welcome_heading()).to_be_visible().await
    }

    /// Opens the "Start New Workout" dialog
    pub async fn click_start_new_workout(&self) -> GymResult<()> {
        self.session
            .locate(self.start_new_workout_button())
            .click()
            .await
    }
}

impl PageObject for DashboardPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/dashboard"
    }

    fn page_name(&self) -> &str {
        "dashboard"
    }
}
