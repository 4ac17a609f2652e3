//! Scenario catalogue and page objects against the in-memory app.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use gymprobe::mock::{MockBackend, MockSessionFactory};
use gymprobe::pages::{
    AppLayout, DashboardPage, ExerciseAddOutcome, HistoryPage, LoginPage, WorkoutPage,
};
use gymprobe::{
    scenario, ElementQuery, FailureKind, GymError, Locator, PageObject, Role, SuiteConfig,
    TestHarness, TestSuite, TextMatch,
};
use tempfile::TempDir;

fn config(dir: &TempDir) -> SuiteConfig {
    SuiteConfig {
        artifacts_dir: dir.path().to_path_buf(),
        action_timeout_ms: 400,
        poll_interval_ms: 20,
        retries: 0,
        ..SuiteConfig::default()
    }
}

// ============================================================================
// Full catalogue
// ============================================================================

#[tokio::test]
async fn test_catalogue_passes_on_seeded_app() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);

    let results = TestHarness::from_config(&config)
        .run(&scenario::suite(), &factory, &config.fixtures())
        .await;

    assert_eq!(results.total(), scenario::catalogue().len());
    assert!(results.all_passed(), "{:#?}", results.failures());
    assert_eq!(results.skipped, 0);
}

#[tokio::test]
async fn test_catalogue_leaves_entities_behind() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let fixtures = config.fixtures();

    TestHarness::from_config(&config)
        .with_filter("admin::create")
        .run(&scenario::suite(), &factory, &fixtures)
        .await;

    let backend = factory.backend();
    assert!(backend
        .exercises()
        .iter()
        .any(|e| e.name == fixtures.run_exercise_name()));
    let template = backend
        .templates()
        .into_iter()
        .find(|t| t.name == fixtures.run_template_name())
        .expect("template created");
    assert_eq!(template.exercises.len(), 1);
    assert!(!template.is_public);
    assert!(template.description.is_empty());
}

#[tokio::test]
async fn test_template_without_exercise_fails_and_screenshots() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);

    let results = TestHarness::from_config(&config)
        .with_filter("create template")
        .run(&scenario::suite(), &factory, &config.fixtures())
        .await;

    assert_eq!(results.failed_count(), 1);
    let failure = &results.failures()[0];
    assert_eq!(failure.kind, Some(FailureKind::Assertion));
    assert_eq!(failure.screenshots.len(), 1);
    assert!(failure.screenshots[0].exists());
}

#[tokio::test]
async fn test_fail_fast_skips_the_rest() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::accounts_only(), &config);

    let suite = TestSuite::new("broken-first").with_cases([
        gymprobe::scenario!("admin", "create template", broken_template),
        gymprobe::scenario!("login", "admin", admin_login),
    ]);
    let results = TestHarness::from_config(&config)
        .with_fail_fast()
        .run(&suite, &factory, &config.fixtures())
        .await;

    assert_eq!(results.total(), 1);
    assert_eq!(results.skipped, 1);
}

async fn broken_template(
    session: &gymprobe::Session,
    _: &gymprobe::Fixtures,
) -> gymprobe::GymResult<()> {
    session.expect_url("/nowhere").await
}

async fn admin_login(
    session: &gymprobe::Session,
    fixtures: &gymprobe::Fixtures,
) -> gymprobe::GymResult<()> {
    LoginPage::new(session).sign_in(fixtures.admin()).await
}

// ============================================================================
// Workout lifecycle and history
// ============================================================================

#[tokio::test]
async fn test_history_shows_workout_only_after_completion() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let fixtures = config.fixtures();
    let (session, _page) = factory.open_page();

    LoginPage::new(&session).sign_in(fixtures.regular()).await.unwrap();
    DashboardPage::new(&session).click_start_new_workout().await.unwrap();
    let mut workout = WorkoutPage::new(&session);
    workout.create_blank_workout(Some("Leg Day 42")).await.unwrap();
    workout.expect_on_workout_page().await.unwrap();

    let layout = AppLayout::new(&session);
    let history = HistoryPage::new(&session);
    layout.go_to_history().await.unwrap();
    history.expect_workout_not_in_history("Leg Day 42").await.unwrap();

    layout.go_to_workouts().await.unwrap();
    session
        .locate(Locator::role(Role::Link, TextMatch::exact("Resume Leg Day 42")))
        .click()
        .await
        .unwrap();
    workout.complete_workout().await.unwrap();

    layout.go_to_history().await.unwrap();
    history.expect_workout_in_history("Leg Day 42").await.unwrap();
}

#[tokio::test]
async fn test_empty_library_branch_is_not_a_failure() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::accounts_only(), &config);
    let (session, _page) = factory.open_page();

    LoginPage::new(&session)
        .sign_in(config.fixtures().regular())
        .await
        .unwrap();
    DashboardPage::new(&session).click_start_new_workout().await.unwrap();
    let mut workout = WorkoutPage::new(&session);
    workout.create_blank_workout(Some("Empty Library")).await.unwrap();

    let outcome = workout.add_any_exercise_if_available().await.unwrap();
    assert_eq!(outcome, ExerciseAddOutcome::LibraryEmpty);
    assert_eq!(workout.lifecycle().exercise_count(), 0);
    workout.expect_no_exercises_yet().await.unwrap();
    workout.complete_workout().await.unwrap();
}

#[tokio::test]
async fn test_added_exercise_shows_on_workout() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let (session, _page) = factory.open_page();

    LoginPage::new(&session)
        .sign_in(config.fixtures().regular())
        .await
        .unwrap();
    DashboardPage::new(&session).click_start_new_workout().await.unwrap();
    let mut workout = WorkoutPage::new(&session);
    workout.create_blank_workout(None).await.unwrap();

    let outcome = workout.add_any_exercise_if_available().await.unwrap();
    assert_eq!(outcome, ExerciseAddOutcome::Added);
    workout.expect_at_least_one_exercise().await.unwrap();
    // modal was dismissed
    session
        .expect(workout.add_exercise_heading())
        .to_be_hidden()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_complete_twice_is_rejected_before_touching_the_page() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let (session, _page) = factory.open_page();

    LoginPage::new(&session)
        .sign_in(config.fixtures().regular())
        .await
        .unwrap();
    DashboardPage::new(&session).click_start_new_workout().await.unwrap();
    let mut workout = WorkoutPage::new(&session);
    workout.create_blank_workout(Some("Once")).await.unwrap();
    workout.complete_workout().await.unwrap();

    let err = workout.complete_workout().await.unwrap_err();
    assert!(matches!(err, GymError::InvalidState { .. }));
    assert_eq!(err.kind(), FailureKind::Assertion);
}

// ============================================================================
// Failure classification
// ============================================================================

#[tokio::test]
async fn test_unscoped_add_button_is_ambiguous() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let (session, _page) = factory.open_page();

    LoginPage::new(&session)
        .sign_in(config.fixtures().regular())
        .await
        .unwrap();
    DashboardPage::new(&session).click_start_new_workout().await.unwrap();
    let mut workout = WorkoutPage::new(&session);
    workout.create_blank_workout(None).await.unwrap();
    session
        .locate(workout.add_first_exercise_button())
        .click()
        .await
        .unwrap();

    let err = session
        .locate(Locator::role(Role::Button, TextMatch::exact("Add")))
        .click()
        .await
        .unwrap_err();
    assert!(matches!(err, GymError::StrictModeViolation { count: 3, .. }));
    assert_eq!(err.kind(), FailureKind::Ambiguity);
}

#[tokio::test]
async fn test_missing_element_times_out_as_assertion() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    let factory = MockSessionFactory::new(MockBackend::seeded(), &config);
    let (session, _page) = factory.open_page();

    let login = LoginPage::new(&session);
    login.goto().await.unwrap();
    let err = session
        .locate(Locator::role(Role::Button, TextMatch::exact("Sign up now")))
        .click()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}
