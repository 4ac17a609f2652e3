use crate::element::ElementQuery;
use crate::locator::{Locator, Role, TextMatch};
use crate::result::GymResult;
use crate::session::Session;

/// Fields of the "Create New User" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

impl UserForm {
    /// Regular account with a unique username and email
    #[must_use]
    pub fn unique(token: u64) -> Self {
        Self {
            username: format!("new_user_{token}"),
            email: format!("new_user_{token}@test.com"),
            password: "newuserpass".to_string(),
            full_name: Some("New Test User Admin".to_string()),
            is_admin: false,
        }
    }

    #[must_use]
    pub const fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// "User Management" tab of the admin panel
#[derive(Debug, Clone, Copy)]
pub struct UserManagementPage<'s> {
    session: &'s Session,
}

impl<'s> UserManagementPage<'s> {
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn add_user_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact("Add User"))
    }

    pub fn modal_title(&self) -> Locator {
        Locator::role(Role::Heading, TextMatch::iregex("create new user"))
    }

    pub fn dialog(&self) -> Locator {
        Locator::role(Role::Dialog, TextMatch::iregex("user"))
    }

    pub fn username_input(&self) -> Locator {
        Locator::label("Username *")
    }

    pub fn email_input(&self) -> Locator {
        Locator::label("Email *")
    }

    pub fn full_name_input(&self) -> Locator {
        Locator::label("Full Name")
    }

    pub fn password_input(&self) -> Locator {
        Locator::label(TextMatch::iregex("^password"))
    }

    pub fn admin_checkbox(&self) -> Locator {
        Locator::label("Admin").within(self.dialog())
    }

    pub fn save_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::exact("Save"))
    }

    /// Listing row for `username`
    pub fn user_row(&self, username: &str) -> Locator {
        Locator::text(TextMatch::exact(format!("@{username}")))
    }

    /// Open the dialog, fill it and save; the dialog must close
    pub async fn create_user(&self, form: &UserForm) -> GymResult<()> {
        tracing::info!(username = %form.username, is_admin = form.is_admin, "create user");
        let s = self.session;
        s.locate(self.add_user_button()).click().await?;
        s.expect(self.modal_title()).to_be_visible().await?;

        s.locate(self.username_input()).fill(&form.username).await?;
        s.locate(self.email_input()).fill(&form.email).await?;
        if let Some(full_name) = &form.full_name {
            s.locate(self.full_name_input()).fill(full_name).await?;
        }
        s.locate(self.password_input()).fill(&form.password).await?;
        if form.is_admin {
            s.locate(self.admin_checkbox()).check().await?;
        }

        s.locate(self.save_button()).click().await?;
        s.expect(self.modal_title()).to_be_hidden().await
    }

    pub async fn expect_user_listed(&self, username: &str) -> GymResult<()> {
        self.session
            .expect(self.user_row(username))
            .to_be_visible()
            .await
    }
}
