use crate::element::ElementQuery;
use crate::fixture::Credential;
use crate::locator::{Locator, Role, TextMatch};
use crate::page_object::PageObject;
use crate::result::GymResult;
use crate::session::Session;

/// `/login`
#[derive(Debug, Clone, Copy)]
pub struct LoginPage<'s> {
    session: &'s Session,
}

impl<'s> LoginPage<'s> {
    /// Bind to a session
    #[must_use]
    pub const fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn email_input(&self) -> Locator {
        Locator::label("Email")
    }

    pub fn password_input(&self) -> Locator {
        Locator::label("Password")
    }

    pub fn submit_button(&self) -> Locator {
        Locator::role(Role::Button, TextMatch::iregex("sign in"))
    }

    pub fn error_message(&self) -> Locator {
        Locator::text(TextMatch::iregex("incorrect email or password"))
    }

    /// Fill the form and submit
    pub async fn login(&self, identifier: &str, secret: &str) -> GymResult<()> {
        tracing::info!(identifier, "login");
        self.session.locate(self.email_input()).fill(identifier).await?;
        self.session.locate(self.password_input()).fill(secret).await?;
        self.session.locate(self.submit_button()).click().await
    }

    /// [`LoginPage::login`] with a fixture credential
    pub async fn login_as(&self, credential: &Credential) -> GymResult<()> {
        self.login(&credential.identifier, &credential.secret).await
    }

    /// Open `/login`, sign in and wait for the dashboard
    pub async fn sign_in(&self, credential: &Credential) -> GymResult<()> {
        self.goto().await?;
        self.login_as(credential).await?;
        self.expect_logged_in().await
    }

    pub async fn expect_on_login_page(&self) -> GymResult<()> {
        self.expect_on_page().await
    }

    pub async fn expect_login_error_visible(&self) -> GymResult<()> {
        self.session.expect(self.error_message()).to_be_visible().await
    }

    pub async fn expect_logged_in(&self) -> GymResult<()> {
        self.session.expect_url(r"/dashboard").await
    }
}

impl PageObject for LoginPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/login"
    }

    fn page_name(&self) -> &str {
        "login"
    }
}
