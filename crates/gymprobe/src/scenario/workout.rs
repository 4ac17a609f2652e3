use crate::fixture::Fixtures;
use crate::pages::{AppLayout, DashboardPage, HistoryPage, LoginPage, WorkoutPage};
use crate::result::GymResult;
use crate::session::Session;

/// Sign in, start a named workout and check the empty workout screen
async fn start_named<'s>(
    session: &'s Session,
    fixtures: &Fixtures,
    name: &str,
) -> GymResult<WorkoutPage<'s>> {
    LoginPage::new(session).sign_in(fixtures.regular()).await?;
    let dashboard = DashboardPage::new(session);
    dashboard.expect_on_dashboard().await?;
    dashboard.click_start_new_workout().await?;

    let mut workout = WorkoutPage::new(session);
    workout.create_blank_workout(Some(name)).await?;
    workout.expect_on_workout_page().await?;
    workout.expect_workout_name_visible(name).await?;
    workout.expect_no_exercises_yet().await?;
    Ok(workout)
}

pub(super) async fn blank_create_and_complete(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let name = format!("E2E Workout {}", fixtures.unique());
    let mut workout = start_named(session, fixtures, &name).await?;
    workout.complete_workout().await
}

pub(super) async fn full_flow_lands_in_history(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let name = format!("flow Workout {}", fixtures.unique());
    let mut workout = start_named(session, fixtures, &name).await?;
    workout.add_any_exercise_if_available().await?;
    workout.complete_workout().await?;

    AppLayout::new(session).go_to_history().await?;
    let history = HistoryPage::new(session);
    history.expect_on_history_page().await?;
    history.expect_workout_in_history(&name).await
}
