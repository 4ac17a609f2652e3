use serde::{Deserialize, Serialize};

use crate::element::ElementQuery;
use crate::locator::{Locator, Role, SelectOption, TextMatch};
use crate::result::GymResult;
use crate::session::Session;

/// How an exercise is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    /// Sets × reps × weight
    WeightBased,
    /// Sets × duration
    TimeBased,
}

impl ExerciseType {
    /// `<option value>` in the type select
    #[must_use]
    pub const fn as_value(&self) -> &'static str {
        match self {
            Self::WeightBased => "WEIGHT_BASED",
            Self::TimeBased => "TIME_BASED",
        }
    }
}

/// Fields of the "Create New Exercise" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseForm {
    pub name: String,
    pub exercise_type: ExerciseType,
    /// Option label, e.g. "Chest"
    pub muscle_group: String,
    /// Option label, e.g. "Barbell"
    pub equipment: String,
    pub description: Option<String>,
}

impl ExerciseForm {
    /// Weight-based chest exercise on a barbell
    #[must_use]
    pub fn weight_based(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercise_type: ExerciseType::WeightBased,
            muscle_group: "Chest".to_string(),
            equipment: "Barbell".to_string(),
            description: Some("test exercise".to_string()),
        }
    }
}

/// "Exercise Management" tab of the admin panel
#[derive(Debug, Clone, Copy)]
pub struct ExerciseManagementPage<'s> {
    session: &'s Session,
}

impl<'s> ExerciseManagementPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn add_exercise_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact("Add Exercise"))
    }

    pub fn modal_title(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("create new exercise"))
    }

    pub fn name_input(&self) -> Locator {
        Locator::label("Exercise Name *")
    }

    pub fn type_select(&self) -> Locator {
        Locator::label("Exercise Type *")
    }

    pub fn muscle_group_select(&self) -> Locator {
        Locator::label("Muscle Group")
    }

    pub fn equipment_select(&self) -> Locator {
        Locator::label("Equipment")
    }

    pub fn description_input(&self) -> Locator {
        Locator::label("Description")
    }

    pub fn save_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact("Save"))
    }

    pub fn exercise_row(&self, name: &str) -> Locator {
        Locator::text(TextMatch::exact(name))
    }

    /// Open the dialog, fill required then optional fields, save
    pub async fn create_exercise(&self, form: &ExerciseForm) -> GymResult<()> {
        tracing::info!(name = %form.name, kind = form.exercise_type.as_value(), "create exercise");
        let s = self.session;
        s.locate(self.add_exercise_button()).click().await?;
        s.expect(self.modal_title()).to_be_visible().await?;

        s.locate(self.name_input()).fill(&form.name).await?;
        s.locate(self.type_select())
            .select_option(SelectOption::Value(form.exercise_type.as_value().to_string()))
            .await?;
        s.locate(self.muscle_group_select())
            .select_option(SelectOption::Label(form.muscle_group.clone()))
            .await?;
        s.locate(self.equipment_select())
            .select_option(SelectOption::Label(form.equipment.clone()))
            .await?;
        if let Some(description) = &form.description {
            s.locate(self.description_input()).fill(description).await?;
        }

        s.locate(self.save_button()).click().await?;
        s.expect(self.modal_title()).to_be_hidden().await
    }

    pub async fn expect_exercise_listed(&self, name: &str) -> GymResult<()> {
        self.session
            .expect(self.exercise_row(name))
            .to_be_visible()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_values_match_select_options() {
        assert_eq!(ExerciseType::WeightBased.as_value(), "WEIGHT_BASED");
        assert_eq!(ExerciseType::TimeBased.as_value(), "TIME_BASED");
        assert!(SelectOption::Value("TIME_BASED".into()).matches("TIME_BASED", "Time based"));
    }
}
