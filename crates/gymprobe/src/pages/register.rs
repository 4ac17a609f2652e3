use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

/// Sign-up form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Identity nobody has registered yet, derived from a unique token
    #[must_use]
    pub fn unique(token: u64) -> Self {
        Self {
            full_name: format!("E2E User {token}"),
            username: format!("e2e_user_{token}"),
            email: format!("e2e_{token}@test.com"),
            password: "Password123!".to_string(),
            confirm_password: "Password123!".to_string(),
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_confirm_password(mut self, confirm: impl Into<String>) -> Self {
        self.confirm_password = confirm.into();
        self
    }
}

/// `/register`
#[derive(Debug, Clone, Copy)]
pub struct RegisterPage<'s> {
    session: &'s Session,
}

impl<'s> RegisterPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn full_name_input(&self) -> Locator {
        Locator::label("Full Name")
    }

    pub fn username_input(&self) -> Locator {
        Locator::label("Username *")
    }

    pub fn email_input(&self) -> Locator {
        Locator::label("Email *")
    }

    /// The password labels differ only by a prefix, so these go by id
    pub fn password_input(&self) -> Locator {
        Locator::css("#password")
    }

    pub fn confirm_password_input(&self) -> Locator {
        Locator::css("#confirmPassword")
    }

    pub fn submit_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("create account"))
    }

    pub fn error_message(&self) -> Locator {
        Locator::text(TextMatch::iregex(
            "passwords do not match|already exists|failed|error",
        ))
    }

    pub fn success_message(&self) -> Locator {
        Locator::text(TextMatch::iregex("account created successfully"))
    }

    /// Fill every field and submit
    pub async fn register(&self, form: &RegistrationForm) -> GymResult<()> {
        tracing::info!(username = %form.username, email = %form.email, "register");
        let s = self.session;
        s.locate(self.full_name_input()).fill(&form.full_name).await?;
        s.locate(self.username_input()).fill(&form.username).await?;
        s.locate(self.email_input()).fill(&form.email).await?;
        s.locate(self.password_input()).fill(&form.password).await?;
        s.locate(self.confirm_password_input())
            .fill(&form.confirm_password)
            .await?;
        s.locate(self.submit_button()).click().await
    }

    pub async fn expect_on_register_page(&self) -> GymResult<()> {
        self.expect_on_page().await
    }

    pub async fn expect_register_error_visible(&self) -> GymResult<()> {
        self.session.expect(self.error_message()).to_be_visible().await
    }

    pub async fn expect_success_message(&self) -> GymResult<()> {
        self.session.expect(self.success_message()).to_be_visible().await
    }
}

impl PageObject for RegisterPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/register"
    }

    fn page_name(&self) -> &str {
        "register"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_form_matches_passwords() {
        let form = RegistrationForm::unique(42);
        assert_eq!(form.username, "e2e_user_42");
        assert_eq!(form.email, "e2e_42@test.com");
        assert_eq!(form.password, form.confirm_password);
    }

    #[test]
    fn test_colliding_overrides_keep_other_fields() {
        let form = RegistrationForm::unique(7).with_email("admin@example.com");
        assert_eq!(form.username, "e2e_user_7");
        assert_eq!(form.email, "admin@example.com");
    }
}
