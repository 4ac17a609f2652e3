//! The end-to-end scenario catalogue.
//!
//! Each scenario is an `async fn(&Session, &Fixtures) -> GymResult<()>` that
//! drives page objects in a fixed order and asserts the final state.
//! [`catalogue`] lists them in run order; the admin template scenario uses
//! the exercise created earlier in the same run, so filtering it in alone
//! fails on a fresh backend.

mod admin;
mod auth;
mod navigation;
mod profile;
mod registration;
mod workout;

use crate::harness::{ScenarioCase, TestSuite};
use crate::scenario;

/// Every scenario, in run order
#[must_use]
pub fn catalogue() -> Vec<ScenarioCase> {
    vec![
        scenario!("login", "admin reaches dashboard", auth::admin_reaches_dashboard),
        scenario!("login", "user sees welcome back", auth::user_sees_welcome),
        scenario!("login", "unknown email rejected", auth::unknown_email_rejected),
        scenario!("login", "wrong password rejected", auth::wrong_password_rejected),
        scenario!("logout", "redirects to login", auth::logout_redirects_to_login),
        scenario!("protected-routes", "dashboard", auth::dashboard_requires_login),
        scenario!("protected-routes", "profile", auth::profile_requires_login),
        scenario!("protected-routes", "workouts", auth::workouts_requires_login),
        scenario!("protected-routes", "history", auth::history_requires_login),
        scenario!("register", "unique identity", registration::unique_identity_succeeds),
        scenario!("register", "duplicate email", registration::duplicate_email_rejected),
        scenario!("register", "duplicate username", registration::duplicate_username_rejected),
        scenario!("register", "password mismatch", registration::password_mismatch_rejected),
        scenario!("profile", "update username and full name", profile::update_shows_success),
        scenario!("navigation", "user sections", navigation::user_visits_sections),
        scenario!("navigation", "admin sections", navigation::admin_visits_sections),
        scenario!("workout", "blank create and complete", workout::blank_create_and_complete),
        scenario!("workout", "full flow lands in history", workout::full_flow_lands_in_history),
        scenario!("admin", "open panel", admin::open_panel),
        scenario!("admin", "user management tab", admin::open_user_management),
        scenario!("admin", "exercise management tab", admin::open_exercise_management),
        scenario!("admin", "workout templates tab", admin::open_workout_templates),
        scenario!("admin", "create user", admin::create_user),
        scenario!("admin", "create exercise", admin::create_exercise),
        scenario!("admin", "create template", admin::create_template),
    ]
}

/// [`catalogue`] as a named suite
#[must_use]
pub fn suite() -> TestSuite {
    TestSuite::new("workouts-e2e").with_cases(catalogue())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let cases = catalogue();
        let ids: HashSet<_> = cases.iter().map(ScenarioCase::id).collect();
        assert_eq!(ids.len(), cases.len());
    }

    #[test]
    fn test_template_runs_after_exercise() {
        let ids: Vec<_> = catalogue().iter().map(ScenarioCase::id).collect();
        let exercise = ids.iter().position(|id| id == "admin::create exercise");
        let template = ids.iter().position(|id| id == "admin::create template");
        assert!(exercise < template);
        assert!(exercise.is_some());
    }

    #[test]
    fn test_groups_cover_every_journey() {
        let groups: HashSet<_> = catalogue().iter().map(|c| c.group).collect();
        for group in [
            "login",
            "logout",
            "protected-routes",
            "register",
            "profile",
            "navigation",
            "workout",
            "admin",
        ] {
            assert!(groups.contains(group), "missing {group}");
        }
    }
}
