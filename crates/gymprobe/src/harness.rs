//! Test harness for running scenario suites.
//!
//! Scenarios run one at a time. Every attempt gets a fresh [`Session`] from
//! a [`SessionFactory`], so nothing but the application's own persisted
//! state crosses scenario boundaries. A failed scenario is retried up to
//! `retries` more times before it is reported as failed.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Serialize, Serializer};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{SuiteConfig, DEFAULT_TEST_TIMEOUT_MS};
use crate::fixture::Fixtures;
use crate::result::{FailureKind, GymError, GymResult};
use crate::session::Session;

/// Future returned by a scenario body
pub type ScenarioFuture<'a> = BoxFuture<'a, GymResult<()>>;

/// Scenario body: drives page objects on a session
pub type ScenarioFn = for<'a> fn(&'a Session, &'a Fixtures) -> ScenarioFuture<'a>;

/// Hands out isolated sessions
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Open a fresh, isolated session
    async fn open(&self) -> GymResult<Session>;
}

/// Build a [`ScenarioCase`] from an `async fn(&Session, &Fixtures) -> GymResult<()>`
#[macro_export]
macro_rules! scenario {
    ($group:expr, $name:expr, $body:path) => {
        $crate::harness::ScenarioCase::new($group, $name, |session, fixtures| {
            ::futures::FutureExt::boxed($body(session, fixtures))
        })
    };
}

/// A single scenario
#[derive(Clone, Copy)]
pub struct ScenarioCase {
    /// Group (one per user journey)
    pub group: &'static str,
    /// Scenario name within the group
    pub name: &'static str,
    /// Timeout override in milliseconds
    pub timeout_ms: Option<u64>,
    run: ScenarioFn,
}

impl std::fmt::Debug for ScenarioCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCase")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl ScenarioCase {
    /// Create a new scenario case
    #[must_use]
    pub fn new(group: &'static str, name: &'static str, run: ScenarioFn) -> Self {
        Self {
            group,
            name,
            timeout_ms: None,
            run,
        }
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// `group::name`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}::{}", self.group, self.name)
    }

    /// Case-insensitive substring match on the id
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        self.id().to_lowercase().contains(&filter.to_lowercase())
    }

    /// Run the body once on `session`
    pub fn run<'a>(&self, session: &'a Session, fixtures: &'a Fixtures) -> ScenarioFuture<'a> {
        (self.run)(session, fixtures)
    }

    fn artifact_name(&self, attempt: u32) -> String {
        let slug = |s: &str| {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                .collect::<String>()
        };
        format!("{}-{}-attempt{attempt}.png", slug(self.group), slug(self.name))
    }
}

/// A test suite containing multiple scenarios
#[derive(Debug, Clone)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Scenarios in run order
    pub cases: Vec<ScenarioCase>,
}

impl TestSuite {
    /// Create a new test suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Add a scenario
    pub fn add_case(&mut self, case: ScenarioCase) {
        self.cases.push(case);
    }

    /// Add scenarios
    #[must_use]
    pub fn with_cases(mut self, cases: impl IntoIterator<Item = ScenarioCase>) -> Self {
        self.cases.extend(cases);
        self
    }

    /// Get the number of scenarios
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.cases.len()
    }

    /// Scenarios whose id contains `filter`
    #[must_use]
    pub fn filtered(&self, filter: Option<&str>) -> Vec<&ScenarioCase> {
        self.cases
            .iter()
            .filter(|c| filter.map_or(true, |f| c.matches(f)))
            .collect()
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    /// `group::name`
    pub name: String,
    /// Whether the scenario passed
    pub passed: bool,
    /// Error message of the last attempt, if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure classification, if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    /// Attempts made (1 + retries used)
    pub attempts: u32,
    /// Wall time over all attempts
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Failure screenshots written
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<PathBuf>,
}

impl TestResult {
    /// Create a passing test result
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            kind: None,
            attempts: 1,
            duration: Duration::ZERO,
            screenshots: Vec::new(),
        }
    }

    /// Create a failing test result
    #[must_use]
    pub fn fail(name: impl Into<String>, error: &GymError) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
            attempts: 1,
            duration: Duration::ZERO,
            screenshots: Vec::new(),
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set attempt count
    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Passed only after a retry
    #[must_use]
    pub const fn is_flaky(&self) -> bool {
        self.passed && self.attempts > 1
    }
}

/// Results from running a test suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResults {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Suite name
    pub suite_name: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Individual test results
    pub results: Vec<TestResult>,
    /// Scenarios skipped after a fail-fast stop
    pub skipped: usize,
    /// Total duration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl SuiteResults {
    /// Check if all tests passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count passed tests
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Count tests that needed a retry
    #[must_use]
    pub fn flaky_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_flaky()).count()
    }

    /// Get total test count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed tests
    #[must_use]
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Test harness for running suites
#[derive(Debug, Clone)]
pub struct TestHarness {
    /// Whether to stop on first failure
    pub fail_fast: bool,
    /// Extra attempts per failed scenario
    pub retries: u32,
    /// Default per-scenario timeout in milliseconds
    pub test_timeout_ms: u64,
    /// Only run scenarios whose id contains this
    pub filter: Option<String>,
    /// Where failure screenshots go (none when unset)
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self {
            fail_fast: false,
            retries: 1,
            test_timeout_ms: DEFAULT_TEST_TIMEOUT_MS,
            filter: None,
            artifacts_dir: None,
        }
    }
}

impl TestHarness {
    /// Create a new test harness
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Harness using the retry, timeout and artifact settings of `config`
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self {
            retries: config.retries,
            test_timeout_ms: config.test_timeout_ms,
            artifacts_dir: Some(config.artifacts_dir.clone()),
            ..Self::default()
        }
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set retries
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the default per-scenario timeout
    #[must_use]
    pub const fn with_test_timeout(mut self, ms: u64) -> Self {
        self.test_timeout_ms = ms;
        self
    }

    /// Only run matching scenarios
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Write failure screenshots to `dir`
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Run a test suite
    pub async fn run<F>(&self, suite: &TestSuite, factory: &F, fixtures: &Fixtures) -> SuiteResults
    where
        F: SessionFactory + ?Sized,
    {
        self.run_with(suite, factory, fixtures, |_| {}).await
    }

    /// Run a test suite, reporting each result as it completes
    pub async fn run_with<F, R>(
        &self,
        suite: &TestSuite,
        factory: &F,
        fixtures: &Fixtures,
        mut on_result: R,
    ) -> SuiteResults
    where
        F: SessionFactory + ?Sized,
        R: FnMut(&TestResult) + Send,
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        let selected = suite.filtered(self.filter.as_deref());
        let span = tracing::info_span!("suite", suite = %suite.name, %run_id);

        async {
            tracing::info!(scenarios = selected.len(), retries = self.retries, "suite started");
            let mut results = Vec::with_capacity(selected.len());
            for case in &selected {
                let result = self.run_case(case, factory, fixtures).await;
                on_result(&result);
                let stop = self.fail_fast && !result.passed;
                results.push(result);
                if stop {
                    tracing::warn!(scenario = %case.id(), "fail-fast: stopping suite");
                    break;
                }
            }
            let skipped = selected.len() - results.len();
            let summary = SuiteResults {
                run_id,
                suite_name: suite.name.clone(),
                started_at,
                results,
                skipped,
                duration: start.elapsed(),
            };
            tracing::info!(
                passed = summary.passed_count(),
                failed = summary.failed_count(),
                skipped,
                "suite finished"
            );
            summary
        }
        .instrument(span)
        .await
    }

    async fn run_case<F>(&self, case: &ScenarioCase, factory: &F, fixtures: &Fixtures) -> TestResult
    where
        F: SessionFactory + ?Sized,
    {
        let id = case.id();
        let max_attempts = self.retries.saturating_add(1);
        let start = Instant::now();
        let mut screenshots = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let outcome = self
                .attempt(case, factory, fixtures, attempt, &mut screenshots)
                .instrument(tracing::info_span!("scenario", scenario = %id, attempt))
                .await;
            match outcome {
                Ok(()) => {
                    tracing::info!(scenario = %id, attempt, "passed");
                    let mut result = TestResult::pass(&id)
                        .with_attempts(attempt)
                        .with_duration(start.elapsed());
                    result.screenshots = screenshots;
                    return result;
                }
                Err(err) if attempt < max_attempts => {
                    tracing::warn!(scenario = %id, attempt, error = %err, "attempt failed, retrying");
                }
                Err(err) => {
                    tracing::error!(scenario = %id, attempt, kind = %err.kind(), error = %err, "failed");
                    let mut result = TestResult::fail(&id, &err)
                        .with_attempts(attempt)
                        .with_duration(start.elapsed());
                    result.screenshots = screenshots;
                    return result;
                }
            }
        }
    }

    async fn attempt<F>(
        &self,
        case: &ScenarioCase,
        factory: &F,
        fixtures: &Fixtures,
        attempt: u32,
        screenshots: &mut Vec<PathBuf>,
    ) -> GymResult<()>
    where
        F: SessionFactory + ?Sized,
    {
        let session = factory.open().await?;
        let timeout_ms = case.timeout_ms.unwrap_or(self.test_timeout_ms);
        let outcome = match tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            case.run(&session, fixtures),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(GymError::Timeout {
                what: format!("scenario {} to finish", case.id()),
                ms: timeout_ms,
                observed: session
                    .current_url()
                    .await
                    .unwrap_or_else(|e| format!("<{e}>")),
            }),
        };

        if outcome.is_err() {
            if let Some(dir) = &self.artifacts_dir {
                match capture(&session, dir, &case.artifact_name(attempt)).await {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "failure screenshot saved");
                        screenshots.push(path);
                    }
                    Err(e) => tracing::warn!(error = %e, "could not capture failure screenshot"),
                }
            }
        }
        if let Err(e) = session.close().await {
            tracing::debug!(error = %e, "session close failed");
        }
        outcome
    }
}

async fn capture(session: &Session, dir: &Path, file_name: &str) -> GymResult<PathBuf> {
    let png = session.screenshot().await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, png).await?;
    Ok(path)
}
