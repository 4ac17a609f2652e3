//! Active-workout screen plus the dashboard's start dialog.
//!
//! The page object tracks where its workout is in the lifecycle and refuses
//! transitions the UI would not allow, before touching the browser.

use crate::element::ElementQuery;
use crate::lifecycle::WorkoutLifecycle;
use crate::locator::{Locator, Role, TextMatch};
use crate::result::GymResult;
use crate::session::Session;

/// Result of the exercise-add sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAddOutcome {
    /// First candidate was added
    Added,
    /// Library had no candidates; "No exercises found" was shown
    LibraryEmpty,
}

/// `/workout/:id`
#[derive(Debug)]
pub struct WorkoutPage<'s> {
    session: &'s Session,
    lifecycle: WorkoutLifecycle,
}

impl<'s> WorkoutPage<'s> {
    /// Page object for a workout that has not been started
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self {
            session,
            lifecycle: WorkoutLifecycle::NotStarted,
        }
    }

    /// Where the workout is in its life
    #[must_use]
    pub const fn lifecycle(&self) -> WorkoutLifecycle {
        self.lifecycle
    }

    pub fn start_dialog_heading(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("start new workout"))
    }

    pub fn workout_name_input(&self) -> Locator {
        Locator::placeholder(TextMatch::iregex("push day, morning run"))
    }

    pub fn start_confirm_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("^start workout$"))
    }

    pub fn empty_state(&self) -> Locator {
        Locator::text(TextMatch::iregex("no exercises yet"))
    }

    pub fn complete_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("^complete$"))
    }

    pub fn complete_dialog_heading(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("complete workout"))
    }

    pub fn complete_confirm_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("complete workout"))
    }

    pub fn add_first_exercise_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("add first exercise"))
    }

    pub fn add_exercise_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex(r"\+ add exercise"))
    }

    pub fn add_exercise_heading(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("add exercise to workout"))
    }

    pub fn exercise_search_input(&self) -> Locator {
        Locator::placeholder(TextMatch::iregex("search by name, muscle group"))
    }

    /// Every "Add" button in the picker, one per candidate row
    pub fn candidate_add_buttons(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("^add$"))
    }

    pub fn no_exercises_found(&self) -> Locator {
        Locator::text(TextMatch::iregex("no exercises found"))
    }

    pub fn done_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("^done$"))
    }

    pub fn exercise_rows(&self) -> Locator {
        Locator::text(TextMatch::iregex("sets|reps"))
    }

    /// Start from the open dashboard dialog and land on the workout screen.
    ///
    /// `name` of `None` leaves the field empty so the app picks a default.
    pub async fn create_blank_workout(&mut self, name: Option<&str>) -> GymResult<()> {
        let next = self.lifecycle.start()?;
        tracing::info!(name = name.unwrap_or("<default>"), "start workout");
        let s = self.session;
        s.expect(self.start_dialog_heading()).to_be_visible().await?;
        if let Some(name) = name {
            s.locate(self.workout_name_input()).fill(name).await?;
        }
        s.locate(self.start_confirm_button()).click().await?;
        self.lifecycle = next;
        Ok(())
    }

    /// Open the add-exercise modal, add the first candidate if any, close it
    pub async fn add_any_exercise_if_available(&mut self) -> GymResult<ExerciseAddOutcome> {
        self.lifecycle.require_active("add an exercise to")?;
        let s = self.session;

        if s.locate(self.add_first_exercise_button()).count().await? > 0 {
            s.locate(self.add_first_exercise_button()).click().await?;
        } else {
            s.locate(self.add_exercise_button()).click().await?;
        }
        s.expect(self.add_exercise_heading()).to_be_visible().await?;

        let outcome = if s.locate(self.candidate_add_buttons()).count().await? > 0 {
            s.locate(self.candidate_add_buttons().first()).click().await?;
            self.lifecycle = self.lifecycle.exercise_added()?;
            ExerciseAddOutcome::Added
        } else {
            s.expect(self.no_exercises_found()).to_be_visible().await?;
            ExerciseAddOutcome::LibraryEmpty
        };
        tracing::debug!(?outcome, "exercise picker");

        s.locate(self.done_button()).click().await?;
        Ok(outcome)
    }

    /// Narrow the add-exercise modal; the modal must already be open
    pub async fn search_exercises(&self, query: &str) -> GymResult<()> {
        self.session
            .locate(self.exercise_search_input())
            .fill(query)
            .await
    }

    /// "Complete" then the confirmation step
    pub async fn complete_workout(&mut self) -> GymResult<()> {
        let next = self.lifecycle.complete()?;
        tracing::info!("complete workout");
        let s = self.session;
        s.locate(self.complete_button()).click().await?;
        s.expect(self.complete_dialog_heading()).to_be_visible().await?;
        s.locate(self.complete_confirm_button()).click().await?;
        self.lifecycle = next;
        Ok(())
    }

    pub async fn expect_on_workout_page(&self) -> GymResult<()> {
        self.session.expect_url(r"/workout").await
    }

    pub async fn expect_workout_name_visible(&self, name: &str) -> GymResult<()> {
        self.session
            .expect(Locator::text(name).first())
            .to_be_visible()
            .await
    }

    pub async fn expect_no_exercises_yet(&self) -> GymResult<()> {
        self.session.expect(self.empty_state()).to_be_visible().await
    }

    pub async fn expect_at_least_one_exercise(&self) -> GymResult<()> {
        self.session
            .expect(self.exercise_rows().first())
            .to_be_visible()
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::locator::Selector;
    use crate::mock::{MockBackend, MockSessionFactory};
    use crate::result::FailureKind;

    fn factory(backend: MockBackend) -> MockSessionFactory {
        MockSessionFactory::new(backend, &SuiteConfig::default())
    }

    mod lifecycle_guard_tests {
        use super::*;

        #[tokio::test]
        async fn test_complete_before_start_is_rejected_without_io() {
            let (session, _) = factory(MockBackend::seeded()).open_page();
            let mut page = WorkoutPage::new(&session);
            let err = page.complete_workout().await.unwrap_err();
            assert_eq!(err.kind(), FailureKind::Assertion);
            assert!(err.to_string().contains("not started"));
            assert_eq!(session.current_url().await.unwrap(), "about:blank");
        }

        #[tokio::test]
        async fn test_add_exercise_requires_active_workout() {
            let (session, _) = factory(MockBackend::seeded()).open_page();
            let mut page = WorkoutPage::new(&session);
            assert!(page.add_any_exercise_if_available().await.is_err());
            assert_eq!(page.lifecycle(), WorkoutLifecycle::NotStarted);
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_candidate_buttons_do_not_match_add_first() {
            let (session, _) = factory(MockBackend::seeded()).open_page();
            let page = WorkoutPage::new(&session);
            let add = page.candidate_add_buttons();
            let name = match add.selector() {
                Selector::Role { name, .. } => name.clone(),
                _ => None,
            }
            .unwrap();
            assert!(name.is_match("Add").unwrap());
            assert!(!name.is_match("Add First Exercise").unwrap());
            assert!(!name.is_match("+ Add Exercise").unwrap());
        }
    }
}
