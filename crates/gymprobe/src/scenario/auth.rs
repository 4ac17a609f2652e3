//! Login, logout and route guarding.

use crate::fixture::Fixtures;
use crate::page_object::PageObject;
use crate::pages::{AppLayout, DashboardPage, LoginPage};
use crate::result::GymResult;
use crate::session::Session;

/// Routes that must bounce an anonymous visitor to `/login`
pub(crate) const PROTECTED_ROUTES: [&str; 4] = ["/dashboard", "/profile", "/workouts", "/history"];

pub(super) async fn admin_reaches_dashboard(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let login = LoginPage::new(session);
    login.goto().await?;
    login.login_as(fixtures.admin()).await?;
    login.expect_logged_in().await
}

pub(super) async fn user_sees_welcome(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    LoginPage::new(session).sign_in(fixtures.regular()).await?;
    DashboardPage::new(session).expect_on_dashboard().await
}

pub(super) async fn unknown_email_rejected(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let login = LoginPage::new(session);
    login.goto().await?;
    let email = format!("nobody_{}@test.com", fixtures.unique());
    login.login(&email, "whatever123").await?;
    login.expect_login_error_visible().await?;
    login.expect_on_login_page().await
}

pub(super) async fn wrong_password_rejected(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let login = LoginPage::new(session);
    login.goto().await?;
    login
        .login(&fixtures.regular().identifier, "wrong-password")
        .await?;
    login.expect_login_error_visible().await?;
    login.expect_on_login_page().await
}

pub(super) async fn logout_redirects_to_login(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let login = LoginPage::new(session);
    login.sign_in(fixtures.regular()).await?;
    AppLayout::new(session).logout().await?;
    login.expect_on_login_page().await?;
    for route in PROTECTED_ROUTES {
        session.goto(route).await?;
        login.expect_on_login_page().await?;
    }
    Ok(())
}

/// Visit `route` twice without a session; both land on `/login`
async fn redirects_to_login(session: &Session, route: &str) -> GymResult<()> {
    let login = LoginPage::new(session);
    for _ in 0..2 {
        session.goto(route).await?;
        login.expect_on_login_page().await?;
    }
    Ok(())
}

pub(super) async fn dashboard_requires_login(session: &Session, _: &Fixtures) -> GymResult<()> {
    redirects_to_login(session, "/dashboard").await
}

pub(super) async fn profile_requires_login(session: &Session, _: &Fixtures) -> GymResult<()> {
    redirects_to_login(session, "/profile").await
}

pub(super) async fn workouts_requires_login(session: &Session, _: &Fixtures) -> GymResult<()> {
    redirects_to_login(session, "/workouts").await
}

pub(super) async fn history_requires_login(session: &Session, _: &Fixtures) -> GymResult<()> {
    redirects_to_login(session, "/history").await
}
