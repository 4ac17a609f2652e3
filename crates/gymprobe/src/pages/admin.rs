use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

const USERS_TAB: &str = "User Management";
const EXERCISES_TAB: &str = "Exercise Management";
const TEMPLATES_TAB: &str = "Workout Templates";

/// `/admin`, administrators only
#[derive(Debug, Clone, Copy)]
pub struct AdminPage<'s> {
    session: &'s Session,
}

impl<'s> AdminPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn tab_button(&self, tab: &str) -> Locator {
        Locator::role(Role::Button, TextMatch::exact(tab))
    }

    pub fn tab_heading(&self, tab: &str) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex(regex::escape(tab)))
    }

    async fn open_tab(&self, tab: &str) -> GymResult<()> {
        tracing::debug!(tab, "admin tab");
        self.session.locate(self.tab_button(tab)).click().await?;
        self.session.expect(self.tab_heading(tab)).to_be_visible().await
    }

    pub async fn open_user_management(&self) -> GymResult<()> {
        self.open_tab(USERS_TAB).await
    }

    pub async fn open_exercise_management(&self) -> GymResult<()> {
        self.open_tab(EXERCISES_TAB).await
    }

    pub async fn open_workout_templates(&self) -> GymResult<()> {
        self.open_tab(TEMPLATES_TAB).await
    }

    pub async fn expect_on_admin_page(&self) -> GymResult<()> {
        self.expect_on_page().await
    }
}

impl PageObject for AdminPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/admin"
    }

    fn url_pattern(&self) -> String {
        "admin".to_string()
    }

    fn page_name(&self) -> &str {
        "admin"
    }
}
