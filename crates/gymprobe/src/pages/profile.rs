use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

/// Account details form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
}

/// Password section of the profile form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Change with a matching confirmation
    #[must_use]
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Self {
        let new = new.into();
        Self {
            current_password: current.into(),
            confirm_password: new.clone(),
            new_password: new,
        }
    }
}

/// `/profile`
#[derive(Debug, Clone, Copy)]
pub struct ProfilePage<'s> {
    session: &'s Session,
}

impl<'s> ProfilePage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn username_input(&self) -> Locator {
        Locator::label("Username")
    }

    pub fn email_input(&self) -> Locator {
        Locator::label("Email")
    }

    pub fn full_name_input(&self) -> Locator {
        Locator::label("Full Name")
    }

    pub fn update_profile_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("update profile"))
    }

    // "New Password" is a substring of "Confirm New Password"
    pub fn current_password_input(&self) -> Locator {
        Locator::label(TextMatch::exact("Current Password"))
    }

    pub fn new_password_input(&self) -> Locator {
        Locator::label(TextMatch::exact("New Password"))
    }

    pub fn confirm_new_password_input(&self) -> Locator {
        Locator::label(TextMatch::exact("Confirm New Password"))
    }

    pub fn success_message(&self) -> Locator {
        Locator::text(TextMatch::iregex(
            "profile updated successfully|profile updated",
        ))
    }

    pub fn error_message(&self) -> Locator {
        Locator::text(TextMatch::iregex(
            "do not match|incorrect|already exists|failed",
        ))
    }

    pub async fn update_profile(&self, form: &ProfileForm) -> GymResult<()> {
        tracing::info!(username = %form.username, "update profile");
        let s = self.session;
        s.locate(self.username_input()).fill(&form.username).await?;
        s.locate(self.email_input()).fill(&form.email).await?;
        s.locate(self.full_name_input()).fill(&form.full_name).await?;
        s.locate(self.update_profile_button()).click().await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> GymResult<()> {
        tracing::info!("change password");
        let s = self.session;
        s.locate(self.current_password_input())
            .fill(&change.current_password)
            .await?;
        s.locate(self.new_password_input())
            .fill(&change.new_password)
            .await?;
        s.locate(self.confirm_new_password_input())
            .fill(&change.confirm_password)
            .await?;
        s.locate(self.update_profile_button()).click().await
    }

    pub async fn expect_on_profile_page(&self) -> GymResult<()> {
        self.expect_on_page().await
    }

    pub async fn expect_success_message(&self) -> GymResult<()> {
        self.session.expect(self.success_message()).to_be_visible().await
    }

    pub async fn expect_error_visible(&self) -> GymResult<()> {
        self.session.expect(self.error_message()).to_be_visible().await
    }
}

impl PageObject for ProfilePage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/profile"
    }

    fn page_name(&self) -> &str {
        "profile"
    }
}
