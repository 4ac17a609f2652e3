//! "Workout Templates" tab of the admin panel.
//!
//! The template builder nests a second dialog, the exercise picker, and its
//! submit button carries the same label as the button that opens it. Every
//! lookup that could hit both is scoped to the builder dialog.

use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::result::GymResult;
use crate::session::Session;

/// Fields of the "Create New Template" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateForm {
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    /// Exercise names, picked in order
    pub exercises: Vec<String>,
}

impl TemplateForm {
    /// Private template with no exercises yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_public: false,
            exercises: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Listed on every user's `/workouts`
    #[must_use]
    pub const fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    #[must_use]
    pub fn with_exercise(mut self, name: impl Into<String>) -> Self {
        self.exercises.push(name.into());
        self
    }
}

const CREATE_TEMPLATE: &str = "Create Template";

#[derive(Debug, Clone, Copy)]
pub struct WorkoutTemplatePage<'s> {
    session: &'s Session,
}

impl<'s> WorkoutTemplatePage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    /// Opens the builder; rendered outside any dialog
    pub fn create_template_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact(CREATE_TEMPLATE))
    }

    pub fn template_dialog(&self) -> Locator {
        Locator::role(Role::Dialog, TextMatch::iregex("template"))
    }

    pub fn modal_title(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("create new template"))
    }

    pub fn name_input(&self) -> Locator {
        Locator::label("Template Name *").within(self.template_dialog())
    }

    pub fn description_input(&self) -> Locator {
        Locator::label("Description").within(self.template_dialog())
    }

    pub fn visibility_radio(&self, public: bool) -> Locator {
        let name = if public { "Public" } else { "Private" };
        Locator::role(Role::Radio, TextMatch::exact(name))
    }

    pub fn add_exercise_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("add exercise"))
            .within(self.template_dialog())
    }

    pub fn picker(&self) -> Locator {
        Locator::role(Role::Dialog, TextMatch::exact("Select Exercise"))
    }

    pub fn picker_entry(&self, exercise: &str) -> Locator {
        Locator::role(Role::Heading, TextMatch::exact(exercise)).within(self.picker())
    }

    /// Exercise already attached to the draft
    pub fn selected_exercise(&self, exercise: &str) -> Locator {
        Locator::role(Role::Heading, TextMatch::exact(exercise)).within(self.template_dialog())
    }

    pub fn save_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact(CREATE_TEMPLATE))
            .within(self.template_dialog())
    }

    pub fn template_row(&self, name: &str) -> Locator {
        Locator::text(TextMatch::exact(name))
    }

    /// Pick one exercise through the picker and wait for it in the draft
    pub async fn add_exercise(&self, exercise: &str) -> GymResult<()> {
        tracing::debug!(exercise, "pick template exercise");
        let s = self.session;
        s.locate(self.add_exercise_button()).click().await?;
        s.expect(self.picker()).to_be_visible().await?;
        s.locate(self.picker_entry(exercise)).click().await?;
        s.expect(self.picker()).to_be_hidden().await?;
        s.expect(self.selected_exercise(exercise))
            .to_be_visible()
            .await
    }

    /// Open the builder, fill it, attach exercises and save
    pub async fn create_template(&self, form: &TemplateForm) -> GymResult<()> {
        tracing::info!(
            name = %form.name,
            exercises = form.exercises.len(),
            public = form.is_public,
            "create template"
        );
        let s = self.session;
        s.locate(self.create_template_button()).click().await?;
        s.expect(self.modal_title()).to_be_visible().await?;

        s.locate(self.name_input()).fill(&form.name).await?;
        if let Some(description) = &form.description {
            s.locate(self.description_input()).fill(description).await?;
        }
        s.locate(self.visibility_radio(form.is_public)).click().await?;
        for exercise in &form.exercises {
            self.add_exercise(exercise).await?;
        }

        s.locate(self.save_button()).click().await?;
        s.expect(self.modal_title()).to_be_hidden().await
    }

    pub async fn expect_template_listed(&self, name: &str) -> GymResult<()> {
        self.session
            .expect(self.template_row(name))
            .to_be_visible()
            .await
    }
}
