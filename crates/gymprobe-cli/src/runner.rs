//! Scenario runner: picks a session factory and drives the harness

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use gymprobe::mock::{MockBackend, MockSessionFactory};
use gymprobe::{
    scenario, BrowserSessionFactory, Fixtures, SessionFactory, SuiteConfig, SuiteResults,
    TestHarness, TestSuite,
};

/// Runs the scenario catalogue against Chromium or the in-memory app
#[derive(Debug)]
pub struct TestRunner {
    config: CliConfig,
    reporter: ProgressReporter,
}

impl TestRunner {
    /// Create a new test runner
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self { config, reporter }
    }

    /// The reporter used for progress output
    #[must_use]
    pub const fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    /// Run the catalogue as `args` select
    ///
    /// # Errors
    ///
    /// Returns error if Chromium cannot be launched; scenario failures are
    /// reported in the returned results instead
    pub async fn run(&mut self, suite_config: &SuiteConfig, args: &RunArgs) -> CliResult<SuiteResults> {
        let suite = scenario::suite();
        let mut harness = TestHarness::from_config(suite_config);
        if let Some(filter) = &args.filter {
            harness = harness.with_filter(filter.clone());
        }
        if args.fail_fast {
            harness = harness.with_fail_fast();
        }
        let fixtures = suite_config.fixtures();

        let results = if args.mock {
            self.reporter.header("Running scenarios against the in-memory app");
            let factory = MockSessionFactory::new(MockBackend::seeded(), suite_config);
            self.execute(&harness, &suite, &factory, &fixtures).await
        } else {
            self.reporter
                .header(&format!("Running scenarios against {}", suite_config.base_url));
            if self.config.verbosity.is_verbose() {
                self.reporter.info(&format!(
                    "launching chromium ({})",
                    if suite_config.headless { "headless" } else { "headed" }
                ));
            }
            let factory = BrowserSessionFactory::launch(suite_config).await?;
            let results = self.execute(&harness, &suite, &factory, &fixtures).await;
            if let Err(err) = factory.shutdown().await {
                tracing::warn!(error = %err, "chromium did not shut down cleanly");
            }
            results
        };

        self.reporter.finish();
        self.reporter.summary(
            results.passed_count(),
            results.failed_count(),
            results.skipped,
            results.duration,
        );
        if results.flaky_count() > 0 {
            self.reporter.warning(&format!(
                "{} scenario(s) passed only after a retry",
                results.flaky_count()
            ));
        }
        Ok(results)
    }

    async fn execute<F>(
        &mut self,
        harness: &TestHarness,
        suite: &TestSuite,
        factory: &F,
        fixtures: &Fixtures,
    ) -> SuiteResults
    where
        F: SessionFactory,
    {
        let selected = suite.filtered(harness.filter.as_deref()).len();
        if selected == 0 {
            self.reporter.warning("No scenarios match the filter");
        }
        self.reporter
            .start_progress(selected as u64, &suite.name);

        let reporter = &self.reporter;
        harness
            .run_with(suite, factory, fixtures, |result| reporter.scenario(result))
            .await
    }
}
