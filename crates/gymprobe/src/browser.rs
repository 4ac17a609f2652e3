//! Browser control over the Chrome `DevTools` Protocol.
//!
//! With the `browser` feature, [`Browser`] launches Chromium through
//! chromiumoxide and [`BrowserSessionFactory`] hands out one isolated
//! browser context per session. Locators are resolved in the page by an
//! injected script (`resolver.js`). Without the feature, launching fails
//! with a configuration error and only the in-memory app is available.

use crate::config::SuiteConfig;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// CDP request timeout
    pub request_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from_suite(&SuiteConfig::default())
    }
}

impl BrowserConfig {
    /// Browser settings of a suite configuration
    #[must_use]
    pub fn from_suite(config: &SuiteConfig) -> Self {
        Self {
            headless: config.headless,
            viewport_width: config.viewport.width,
            viewport_height: config.viewport.height,
            chromium_path: config.chromium_path.clone(),
            sandbox: config.sandbox,
            request_timeout_ms: config.navigation_timeout_ms,
        }
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Decode the JSON string the resolver returns
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
fn parse_reply(locator: &crate::locator::Locator, raw: &str) -> crate::result::GymResult<Reply> {
    serde_json::from_str(raw).map_err(|e| crate::result::GymError::PageError {
        message: format!("resolver reply for {locator} unreadable: {e}"),
    })
}

/// Resolver reply
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
struct Reply {
    count: usize,
    visible: usize,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

impl Reply {
    /// Turn an action reply into a result
    #[cfg_attr(not(feature = "browser"), allow(dead_code))]
    fn into_action(self, locator: &crate::locator::Locator) -> crate::result::GymResult<()> {
        use crate::result::GymError;
        match (self.count, self.done, self.error) {
            (_, _, Some(message)) => Err(GymError::Interaction {
                locator: locator.to_string(),
                message,
            }),
            (1, true, None) => Ok(()),
            (0, _, None) => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "no matching element".to_string(),
            }),
            (1, false, None) => Err(GymError::Interaction {
                locator: locator.to_string(),
                message: "action was not performed".to_string(),
            }),
            (count, _, None) => Err(GymError::StrictModeViolation {
                locator: locator.to_string(),
                count,
            }),
        }
    }
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use base64::Engine;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::cdp::browser_protocol::target::{
        CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;

    use super::{parse_reply, BrowserConfig, Reply};
    use crate::config::SuiteConfig;
    use crate::harness::SessionFactory;
    use crate::locator::{Locator, SelectOption};
    use crate::result::{GymError, GymResult};
    use crate::session::Session;
    use crate::surface::{Probe, Surface};

    const RESOLVER: &str = include_str!("resolver.js");

    fn page_error(e: impl std::fmt::Display) -> GymError {
        GymError::PageError {
            message: e.to_string(),
        }
    }

    /// Browser instance with real CDP connection
    #[derive(Debug, Clone)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: Arc<tokio::task::JoinHandle<()>>,
    }

    impl Browser {
        /// Launch a new browser instance with real CDP
        ///
        /// # Errors
        ///
        /// [`GymError::BrowserNotFound`] when no executable is configured or
        /// detected, [`GymError::BrowserLaunch`] when Chromium fails to start
        pub async fn launch(config: BrowserConfig) -> GymResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .request_timeout(Duration::from_millis(config.request_timeout_ms));

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|message| {
                if config.chromium_path.is_none() {
                    tracing::warn!(%message, "chromium auto-detection failed");
                    GymError::BrowserNotFound
                } else {
                    GymError::BrowserLaunch { message }
                }
            })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                GymError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!(error = %e, "cdp handler stopped");
                        break;
                    }
                }
            });

            tracing::info!(headless = config.headless, "browser launched");
            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle: Arc::new(handle),
            })
        }

        /// Open a page in a fresh browser context (own cookies and storage)
        ///
        /// # Errors
        ///
        /// Returns error if the context or page cannot be created
        pub async fn new_surface(&self) -> GymResult<CdpSurface> {
            let browser = self.inner.lock().await;
            let context_id = browser
                .execute(CreateBrowserContextParams::default())
                .await
                .map_err(page_error)?
                .result
                .browser_context_id;
            let target = CreateTargetParams::builder()
                .url("about:blank")
                .browser_context_id(context_id.clone())
                .build()
                .map_err(page_error)?;
            let page = browser.new_page(target).await.map_err(page_error)?;
            tracing::debug!(context = ?context_id, "opened browser context");
            Ok(CdpSurface {
                browser: Arc::clone(&self.inner),
                page,
                context_id,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        ///
        /// # Errors
        ///
        /// Returns error if Chromium does not shut down cleanly
        pub async fn close(&self) -> GymResult<()> {
            let mut browser = self.inner.lock().await;
            browser.close().await.map_err(|e| GymError::BrowserLaunch {
                message: e.to_string(),
            })?;
            self.handle.abort();
            Ok(())
        }
    }

    /// One page in its own browser context
    #[derive(Debug)]
    pub struct CdpSurface {
        browser: Arc<Mutex<CdpBrowser>>,
        page: CdpPage,
        context_id: BrowserContextId,
    }

    impl CdpSurface {
        async fn run(
            &self,
            op: &str,
            locator: &Locator,
            arg: &serde_json::Value,
        ) -> GymResult<Reply> {
            let script = format!("{RESOLVER}\n{}", locator.to_query(op, arg)?);
            let raw: String = self
                .page
                .evaluate(script)
                .await
                .map_err(page_error)?
                .into_value()
                .map_err(page_error)?;
            parse_reply(locator, &raw)
        }

        async fn act(&self, op: &str, locator: &Locator, arg: serde_json::Value) -> GymResult<()> {
            self.run(op, locator, &arg).await?.into_action(locator)
        }
    }

    #[async_trait]
    impl Surface for CdpSurface {
        async fn navigate(&self, url: &str) -> GymResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| GymError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> GymResult<String> {
            self.page
                .evaluate("window.location.href")
                .await
                .map_err(page_error)?
                .into_value()
                .map_err(page_error)
        }

        async fn probe(&self, locator: &Locator) -> GymResult<Probe> {
            let reply = self.run("probe", locator, &serde_json::Value::Null).await?;
            Ok(Probe {
                count: reply.count,
                visible: reply.visible,
            })
        }

        async fn click(&self, locator: &Locator) -> GymResult<()> {
            self.act("click", locator, serde_json::Value::Null).await
        }

        async fn fill(&self, locator: &Locator, value: &str) -> GymResult<()> {
            self.act("fill", locator, serde_json::Value::from(value))
                .await
        }

        async fn select_option(&self, locator: &Locator, option: &SelectOption) -> GymResult<()> {
            self.act("select", locator, serde_json::to_value(option)?)
                .await
        }

        async fn check(&self, locator: &Locator) -> GymResult<()> {
            self.act("check", locator, serde_json::Value::Null).await
        }

        async fn screenshot(&self) -> GymResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = self.page.execute(params).await.map_err(page_error)?;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(page_error)
        }

        async fn close(&self) -> GymResult<()> {
            self.page.clone().close().await.map_err(page_error)?;
            let browser = self.browser.lock().await;
            browser
                .execute(DisposeBrowserContextParams::new(self.context_id.clone()))
                .await
                .map_err(page_error)?;
            Ok(())
        }
    }

    /// One shared Chromium, one browser context per session
    #[derive(Debug, Clone)]
    pub struct BrowserSessionFactory {
        browser: Browser,
        config: SuiteConfig,
    }

    impl BrowserSessionFactory {
        /// Launch Chromium as configured
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched
        pub async fn launch(config: &SuiteConfig) -> GymResult<Self> {
            let browser = Browser::launch(BrowserConfig::from_suite(config)).await?;
            Ok(Self {
                browser,
                config: config.clone(),
            })
        }

        /// The shared browser
        #[must_use]
        pub const fn browser(&self) -> &Browser {
            &self.browser
        }

        /// Shut Chromium down
        ///
        /// # Errors
        ///
        /// Returns error if Chromium does not shut down cleanly
        pub async fn shutdown(&self) -> GymResult<()> {
            self.browser.close().await
        }
    }

    #[async_trait]
    impl SessionFactory for BrowserSessionFactory {
        async fn open(&self) -> GymResult<Session> {
            let surface = self.browser.new_surface().await?;
            Ok(Session::from_config(Arc::new(surface), &self.config))
        }
    }
}

// ============================================================================
// Without the `browser` feature
// ============================================================================

#[cfg(not(feature = "browser"))]
mod unavailable {
    use async_trait::async_trait;

    use crate::config::SuiteConfig;
    use crate::harness::SessionFactory;
    use crate::result::{GymError, GymResult};
    use crate::session::Session;

    fn disabled() -> GymError {
        GymError::config("built without the `browser` feature; use the in-memory app (--mock)")
    }

    /// Placeholder factory; never launches
    #[derive(Debug, Clone)]
    pub struct BrowserSessionFactory {
        _private: (),
    }

    impl BrowserSessionFactory {
        /// Always fails without the `browser` feature
        ///
        /// # Errors
        ///
        /// Always [`GymError::Config`]
        pub async fn launch(_config: &SuiteConfig) -> GymResult<Self> {
            Err(disabled())
        }

        /// Nothing to shut down
        ///
        /// # Errors
        ///
        /// Never
        pub async fn shutdown(&self) -> GymResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl SessionFactory for BrowserSessionFactory {
        async fn open(&self) -> GymResult<Session> {
            Err(disabled())
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, BrowserSessionFactory, CdpSurface};

#[cfg(not(feature = "browser"))]
pub use unavailable::BrowserSessionFactory;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::{Locator, Role, TextMatch};
    use crate::result::{FailureKind, GymError};

    fn button() -> Locator {
        Locator::role(Role::Button, TextMatch::exact("Save"))
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_from_suite_carries_browser_settings() {
            let suite = SuiteConfig {
                headless: false,
                sandbox: false,
                chromium_path: Some("/usr/bin/chromium".into()),
                ..SuiteConfig::default()
            };
            let config = BrowserConfig::from_suite(&suite);
            assert!(!config.headless);
            assert!(!config.sandbox);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
            assert_eq!(config.viewport_width, suite.viewport.width);
        }

        #[test]
        fn test_builders() {
            let config = BrowserConfig::default()
                .with_viewport(800, 600)
                .with_headless(false)
                .with_no_sandbox();
            assert_eq!((config.viewport_width, config.viewport_height), (800, 600));
            assert!(!config.headless && !config.sandbox);
        }
    }

    mod reply_tests {
        use super::*;

        #[test]
        fn test_unique_done_is_ok() {
            let reply = parse_reply(&button(), r#"{"count":1,"visible":1,"done":true}"#).unwrap();
            assert!(reply.into_action(&button()).is_ok());
        }

        #[test]
        fn test_several_matches_is_strict_violation() {
            let reply = parse_reply(&button(), r#"{"count":3,"visible":3}"#).unwrap();
            let err = reply.into_action(&button()).unwrap_err();
            assert!(matches!(err, GymError::StrictModeViolation { count: 3, .. }));
            assert_eq!(err.kind(), FailureKind::Ambiguity);
        }

        #[test]
        fn test_script_error_is_interaction() {
            let reply =
                parse_reply(&button(), r#"{"count":1,"visible":1,"error":"no option"}"#).unwrap();
            let err = reply.into_action(&button()).unwrap_err();
            assert!(err.to_string().contains("no option"));
        }

        #[test]
        fn test_garbage_reply() {
            assert!(parse_reply(&button(), "undefined").is_err());
        }
    }
}
