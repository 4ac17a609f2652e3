//! CLI configuration

use crate::commands::RunArgs;
use crate::error::CliResult;
use gymprobe::SuiteConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "gymprobe.yaml";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "gymprobe=info,warn",
            Self::Debug => "gymprobe=debug,info",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Explicit `--config` file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set the configuration file
    #[must_use]
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// The file the suite configuration is read from, if any
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(|| {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            fallback.is_file().then(|| fallback.to_path_buf())
        })
    }

    /// Suite configuration: defaults, then the config file, then the environment
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or a value does not parse
    pub fn suite_config(&self) -> CliResult<SuiteConfig> {
        let base = match self.config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                SuiteConfig::load(&path)?
            }
            None => SuiteConfig::default(),
        };
        Ok(base.apply_env()?)
    }
}

/// Layer `run` flags over `config` and validate the result
///
/// # Errors
///
/// Returns error if the combined configuration is invalid
pub fn apply_run_args(mut config: SuiteConfig, args: &RunArgs) -> CliResult<SuiteConfig> {
    if let Some(url) = &args.base_url {
        config.base_url.clone_from(url);
    }
    if args.headed {
        config.headless = false;
    }
    if let Some(retries) = args.retries {
        config.retries = retries;
    }
    if let Some(timeout) = args.timeout {
        config.test_timeout_ms = timeout;
    }
    if let Some(dir) = &args.output {
        config.artifacts_dir.clone_from(dir);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_is_quiet() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_quiet());
            assert!(!Verbosity::Debug.is_quiet());
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_log_filter_grows_with_verbosity() {
            assert_eq!(Verbosity::Quiet.log_filter(), "error");
            assert_eq!(Verbosity::Normal.log_filter(), "warn");
            assert!(Verbosity::Verbose.log_filter().contains("gymprobe=info"));
            assert!(Verbosity::Debug.log_filter().contains("gymprobe=debug"));
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_forced_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod suite_config_tests {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        #[test]
        fn test_explicit_file_wins() {
            let config = CliConfig::new().with_config_path(Some(PathBuf::from("custom.yaml")));
            assert_eq!(config.config_file(), Some(PathBuf::from("custom.yaml")));
        }

        #[test]
        fn test_loads_explicit_file() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("suite.yaml");
            fs::write(&path, "base_url: http://127.0.0.1:9999\nretries: 3\n").unwrap();

            let suite = CliConfig::new()
                .with_config_path(Some(path))
                .suite_config()
                .unwrap();
            assert_eq!(suite.retries, 3);
        }

        #[test]
        fn test_missing_explicit_file_is_error() {
            let dir = TempDir::new().unwrap();
            let result = CliConfig::new()
                .with_config_path(Some(dir.path().join("absent.yaml")))
                .suite_config();
            assert!(result.is_err());
        }
    }

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_flags_override_config() {
            let args = RunArgs {
                base_url: Some("http://10.0.0.5:8080".to_string()),
                headed: true,
                retries: Some(0),
                timeout: Some(120_000),
                output: Some(PathBuf::from("shots")),
                ..RunArgs::default()
            };
            let config = apply_run_args(SuiteConfig::default(), &args).unwrap();
            assert_eq!(config.base_url, "http://10.0.0.5:8080");
            assert!(!config.headless);
            assert_eq!(config.retries, 0);
            assert_eq!(config.test_timeout_ms, 120_000);
            assert_eq!(config.artifacts_dir, PathBuf::from("shots"));
        }

        #[test]
        fn test_absent_flags_keep_config() {
            let base = SuiteConfig::default();
            let config = apply_run_args(base.clone(), &RunArgs::default()).unwrap();
            assert_eq!(config.base_url, base.base_url);
            assert_eq!(config.headless, base.headless);
            assert_eq!(config.retries, base.retries);
        }

        #[test]
        fn test_invalid_override_rejected() {
            let args = RunArgs {
                base_url: Some("localhost:5173".to_string()),
                ..RunArgs::default()
            };
            assert!(apply_run_args(SuiteConfig::default(), &args).is_err());
        }

        #[test]
        fn test_zero_timeout_rejected() {
            let args = RunArgs {
                timeout: Some(0),
                ..RunArgs::default()
            };
            assert!(apply_run_args(SuiteConfig::default(), &args).is_err());
        }
    }
}
