//! Suite configuration.
//!
//! Layering, lowest to highest: built-in defaults, `gymprobe.yaml`,
//! environment variables, command-line flags (applied by the CLI).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fixture::{Credential, Fixtures, ADMIN_USERNAME};
use crate::result::{GymError, GymResult};
use crate::wait::{
    WaitOptions, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_NAVIGATION_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS,
};

/// Default address of the frontend dev server
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Default per-scenario timeout (30 seconds)
pub const DEFAULT_TEST_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "GYMPROBE_BASE_URL";
/// Environment variable overriding `headless`
pub const ENV_HEADLESS: &str = "GYMPROBE_HEADLESS";
/// Environment variable overriding `retries`
pub const ENV_RETRIES: &str = "GYMPROBE_RETRIES";
/// Environment variable overriding `chromium_path`
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";

/// Browser viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything a run needs to know about its environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Frontend origin
    pub base_url: String,
    /// Run Chromium without a window
    pub headless: bool,
    /// Action and assertion timeout
    pub action_timeout_ms: u64,
    /// Page load timeout
    pub navigation_timeout_ms: u64,
    /// Whole-scenario timeout
    pub test_timeout_ms: u64,
    /// Poll interval for waits
    pub poll_interval_ms: u64,
    /// Extra attempts for a failed scenario
    pub retries: u32,
    /// Seeded regular account
    pub regular_user: Credential,
    /// Seeded admin account
    pub admin_user: Credential,
    /// Seeded admin username (used to provoke duplicate-username errors)
    pub admin_username: String,
    /// Where failure screenshots go
    pub artifacts_dir: PathBuf,
    /// Chromium executable (auto-detected when absent)
    pub chromium_path: Option<String>,
    /// Chromium sandbox (disable in containers)
    pub sandbox: bool,
    /// Browser viewport
    pub viewport: Viewport,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            action_timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            test_timeout_ms: DEFAULT_TEST_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            retries: 1,
            regular_user: Credential::regular_user(),
            admin_user: Credential::admin_user(),
            admin_username: ADMIN_USERNAME.to_string(),
            artifacts_dir: PathBuf::from("target/gymprobe"),
            chromium_path: None,
            sandbox: true,
            viewport: Viewport::default(),
        }
    }
}

impl SuiteConfig {
    /// Parse YAML; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error on malformed YAML or unknown keys
    pub fn from_yaml_str(yaml: &str) -> GymResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a YAML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> GymResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            GymError::Yaml(inner) => {
                GymError::config(format!("{}: {inner}", path.display()))
            }
            other => other,
        })
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_yaml(&self) -> GymResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unparsable value
    pub fn apply_env(self) -> GymResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    ///
    /// # Errors
    ///
    /// Returns error if a value cannot be parsed
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> GymResult<Self> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            self.headless = parse_bool(ENV_HEADLESS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RETRIES) {
            self.retries = raw
                .trim()
                .parse()
                .map_err(|_| GymError::config(format!("{ENV_RETRIES}={raw:?} is not a number")))?;
        }
        if let Some(path) = lookup(ENV_CHROMIUM_PATH) {
            self.chromium_path = Some(path);
        }
        Ok(self)
    }

    /// Reject values that cannot work
    ///
    /// # Errors
    ///
    /// [`GymError::Config`] describing the first problem
    pub fn validate(&self) -> GymResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GymError::config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        for (name, value) in [
            ("action_timeout_ms", self.action_timeout_ms),
            ("navigation_timeout_ms", self.navigation_timeout_ms),
            ("test_timeout_ms", self.test_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(GymError::config(format!("{name} must be greater than zero")));
            }
        }
        if self.poll_interval_ms > self.action_timeout_ms {
            return Err(GymError::config(
                "poll_interval_ms must not exceed action_timeout_ms",
            ));
        }
        Ok(())
    }

    /// Wait policy for actions and assertions
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.action_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Identity fixtures for one run
    #[must_use]
    pub fn fixtures(&self) -> Fixtures {
        Fixtures::new(self.regular_user.clone(), self.admin_user.clone())
            .with_admin_username(self.admin_username.clone())
    }
}

fn parse_bool(key: &str, raw: &str) -> GymResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GymError::config(format!("{key}={raw:?} is not a boolean"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, "http://localhost:5173");
            assert!(config.headless);
            assert_eq!(config.retries, 1);
            assert_eq!(config.action_timeout_ms, 5_000);
            assert_eq!(config.test_timeout_ms, 30_000);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml_str(
                "base_url: http://staging:8080\nretries: 0\nadmin_user:\n  identifier: root@example.com\n  secret: s3cret\n",
            )
            .unwrap();
            assert_eq!(config.base_url, "http://staging:8080");
            assert_eq!(config.retries, 0);
            assert_eq!(config.admin_user.identifier, "root@example.com");
            assert_eq!(config.regular_user, Credential::regular_user());
            assert_eq!(config.poll_interval_ms, 50);
        }

        #[test]
        fn test_empty_yaml() {
            assert_eq!(SuiteConfig::from_yaml_str("").unwrap(), SuiteConfig::default());
        }

        #[test]
        fn test_unknown_key_rejected() {
            assert!(SuiteConfig::from_yaml_str("base_ulr: http://x\n").is_err());
        }

        #[test]
        fn test_yaml_round_trip_through_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("gymprobe.yaml");
            let mut config = SuiteConfig::default();
            config.headless = false;
            config.viewport = Viewport {
                width: 1920,
                height: 1080,
            };
            std::fs::write(&path, config.to_yaml().unwrap()).unwrap();
            assert_eq!(SuiteConfig::load(&path).unwrap(), config);
        }

        #[test]
        fn test_load_reports_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("broken.yaml");
            std::fs::write(&path, "retries: [1, 2]\n").unwrap();
            let err = SuiteConfig::load(&path).unwrap_err();
            assert!(err.to_string().contains("broken.yaml"));
        }
    }

    mod override_tests {
        use super::*;

        fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
            let map: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            move |key| map.get(key).cloned()
        }

        #[test]
        fn test_env_overrides() {
            let config = SuiteConfig::default()
                .apply_overrides(env(&[
                    ("GYMPROBE_BASE_URL", "http://ci:3000"),
                    ("GYMPROBE_HEADLESS", "false"),
                    ("GYMPROBE_RETRIES", "3"),
                    ("CHROMIUM_PATH", "/usr/bin/chromium"),
                ]))
                .unwrap();
            assert_eq!(config.base_url, "http://ci:3000");
            assert!(!config.headless);
            assert_eq!(config.retries, 3);
            assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        }

        #[test]
        fn test_bad_bool() {
            let err = SuiteConfig::default()
                .apply_overrides(env(&[("GYMPROBE_HEADLESS", "maybe")]))
                .unwrap_err();
            assert!(err.to_string().contains("GYMPROBE_HEADLESS"));
        }

        #[test]
        fn test_no_overrides() {
            let config = SuiteConfig::default().apply_overrides(env(&[])).unwrap();
            assert_eq!(config, SuiteConfig::default());
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_rejects_non_http_base_url() {
            let mut config = SuiteConfig::default();
            config.base_url = "localhost:5173".into();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_rejects_zero_timeout() {
            let mut config = SuiteConfig::default();
            config.action_timeout_ms = 0;
            assert!(config.validate().unwrap_err().to_string().contains("action_timeout_ms"));
        }

        #[test]
        fn test_fixtures_follow_config() {
            let mut config = SuiteConfig::default();
            config.admin_username = "root".into();
            let fixtures = config.fixtures();
            assert_eq!(fixtures.colliding_username(), "root");
            assert_eq!(fixtures.admin(), &Credential::admin_user());
        }
    }
}
