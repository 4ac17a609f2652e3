use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

/// `/history`, completed workouts only
#[derive(Debug, Clone, Copy)]
pub struct HistoryPage<'s> {
    session: &'s Session,
}

impl<'s> HistoryPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn heading(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("workout history"))
    }

    pub fn search_input(&self) -> Locator {
        Locator::placeholder(TextMatch::iregex("search workouts or exercises"))
    }

    /// Card for a workout, matched on its name
    pub fn workout_card(&self, name: &str) -> Locator {
        Locator::text(name).first()
    }

    pub async fn search(&self, query: &str) -> GymResult<()> {
        tracing::debug!(query, "search history");
        self.session.locate(self.search_input()).fill(query).await
    }

    pub async fn expect_on_history_page(&self) -> GymResult<()> {
        self.expect_on_page().await?;
        self.session.expect(self.heading()).to_be_visible().await
    }

    pub async fn expect_workout_in_history(&self, name: &str) -> GymResult<()> {
        self.session
            .expect(self.workout_card(name))
            .to_be_visible()
            .await
    }

    pub async fn expect_workout_not_in_history(&self, name: &str) -> GymResult<()> {
        self.session
            .expect(self.workout_card(name))
            .to_be_hidden()
            .await
    }
}

impl PageObject for HistoryPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/history"
    }

    fn page_name(&self) -> &str {
        "history"
    }
}
