//! Admin panel: tabs and entity creation.

use crate::fixture::Fixtures;
use crate::page_object::PageObject;
use crate::pages::{
    AdminPage, ExerciseForm, ExerciseManagementPage, LoginPage, TemplateForm, UserForm,
    UserManagementPage, WorkoutTemplatePage,
};
use crate::result::GymResult;
use crate::session::Session;

async fn admin_panel<'s>(session: &'s Session, fixtures: &Fixtures) -> GymResult<AdminPage<'s>> {
    LoginPage::new(session).sign_in(fixtures.admin()).await?;
    let admin = AdminPage::new(session);
    admin.goto().await?;
    Ok(admin)
}

pub(super) async fn open_panel(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .expect_on_admin_page()
        .await
}

pub(super) async fn open_user_management(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_user_management()
        .await
}

pub(super) async fn open_exercise_management(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_exercise_management()
        .await
}

pub(super) async fn open_workout_templates(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_workout_templates()
        .await
}

pub(super) async fn create_user(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_user_management()
        .await?;
    let users = UserManagementPage::new(session);
    let form = UserForm::unique(fixtures.unique());
    users.create_user(&form).await?;
    users.expect_user_listed(&form.username).await
}

pub(super) async fn create_exercise(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_exercise_management()
        .await?;
    let exercises = ExerciseManagementPage::new(session);
    let name = fixtures.run_exercise_name();
    exercises
        .create_exercise(&ExerciseForm::weight_based(name.as_str()))
        .await?;
    exercises.expect_exercise_listed(&name).await
}

pub(super) async fn create_template(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    admin_panel(session, fixtures)
        .await?
        .open_workout_templates()
        .await?;
    let templates = WorkoutTemplatePage::new(session);
    let name = fixtures.run_template_name();
    let form = TemplateForm::new(name.as_str()).with_exercise(fixtures.run_exercise_name());
    templates.create_template(&form).await?;
    templates.expect_template_listed(&name).await
}
