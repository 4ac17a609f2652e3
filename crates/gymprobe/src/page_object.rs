//! Page Object Model support.
//!
//! A page object maps one screen of the application to named locators,
//! user-intent actions and `expect_*` assertions. Locator accessors return
//! plain [`crate::Locator`] values; actions bind them to the session's page
//! with [`Session::locate`] and assertions with [`Session::expect`].

use async_trait::async_trait;

use crate::result::GymResult;
use crate::session::Session;

/// Trait for page objects representing a routed screen of the UI.
///
/// # Example
///
/// ```ignore
/// struct LoginPage<'s> {
///     session: &'s Session,
/// }
///
/// impl PageObject for LoginPage<'_> {
///     fn session(&self) -> &Session {
///         self.session
///     }
///
///     fn path(&self) -> &str {
///         "/login"
///     }
/// }
///
/// login.goto().await?;
/// login.expect_on_page().await?;
/// ```
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Session the page object drives
    fn session(&self) -> &Session;

    /// Canonical path of the screen
    fn path(&self) -> &str;

    /// Regex the current URL must match while on this screen
    fn url_pattern(&self) -> String {
        regex::escape(self.path())
    }

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Direct navigation to [`PageObject::path`]
    async fn goto(&self) -> GymResult<()> {
        tracing::debug!(page = self.page_name(), path = self.path(), "goto page");
        self.session().goto(self.path()).await
    }

    /// URL matches [`PageObject::url_pattern`]
    async fn expect_on_page(&self) -> GymResult<()> {
        self.session().expect_url(&self.url_pattern()).await
    }
}
