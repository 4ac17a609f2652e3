use crate::fixture::Fixtures;
use crate::page_object::PageObject;
use crate::pages::{RegisterPage, RegistrationForm};
use crate::result::GymResult;
use crate::session::Session;

async fn rejected(session: &Session, form: &RegistrationForm) -> GymResult<()> {
    let page = RegisterPage::new(session);
    page.goto().await?;
    page.register(form).await?;
    page.expect_register_error_visible().await?;
    page.expect_on_register_page().await
}

pub(super) async fn unique_identity_succeeds(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let page = RegisterPage::new(session);
    page.goto().await?;
    page.register(&RegistrationForm::unique(fixtures.unique()))
        .await?;
    page.expect_success_message().await
}

pub(super) async fn duplicate_email_rejected(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let form = RegistrationForm::unique(fixtures.unique()).with_email(fixtures.colliding_email());
    rejected(session, &form).await
}

pub(super) async fn duplicate_username_rejected(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let form =
        RegistrationForm::unique(fixtures.unique()).with_username(fixtures.colliding_username());
    rejected(session, &form).await
}

pub(super) async fn password_mismatch_rejected(session: &Session, fixtures: &Fixtures) -> GymResult<()> {
    let form = RegistrationForm::unique(fixtures.unique()).with_confirm_password("Different123!");
    rejected(session, &form).await
}
