//! gymprobe: run the Workouts end-to-end scenarios
//!
//! ## Usage
//!
//! ```bash
//! gymprobe run                          # All scenarios against localhost:5173
//! gymprobe run --filter admin --headed  # Admin scenarios, visible browser
//! gymprobe run --mock --format json     # In-memory app, JSON report
//! gymprobe list                         # Scenario ids in run order
//! gymprobe config                       # Effective configuration
//! ```

use clap::Parser;
use gymprobe::{scenario, SuiteConfig};
use gymprobe_cli::{
    apply_run_args, render_json, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands,
    ConfigArgs, ListArgs, OutputFormat, ProgressReporter, RunArgs, TestRunner, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Run(args) => run_scenarios(config, &args),
        Commands::List(args) => {
            run_list(&config, &args);
            Ok(())
        }
        Commands::Config(args) => run_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_config_path(cli.config.clone())
}

// Respects RUST_LOG; -v/-vv only change the default
fn init_tracing(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_scenarios(config: CliConfig, args: &RunArgs) -> CliResult<()> {
    let suite_config = apply_run_args(config.suite_config()?, args)?;
    let format: OutputFormat = args.format.into();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::test_execution(format!("Failed to create runtime: {e}")))?;

    let mut runner = TestRunner::new(config);
    let results = rt.block_on(runner.run(&suite_config, args))?;

    if format == OutputFormat::Json {
        println!("{}", render_json(&results)?);
    }

    if results.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: results.failed_count(),
            total: results.total(),
        })
    }
}

fn run_list(config: &CliConfig, args: &ListArgs) {
    let suite = scenario::suite();
    let cases = suite.filtered(args.filter.as_deref());
    for case in &cases {
        println!("{}", case.id());
    }

    let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    reporter.info(&format!("{} of {} scenarios", cases.len(), suite.test_count()));
}

fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let suite_config = if args.defaults {
        SuiteConfig::default()
    } else {
        config.suite_config()?
    };
    if config.verbosity.is_verbose() {
        if let Some(path) = config.config_file() {
            eprintln!("# from {}", path.display());
        }
    }
    print!("{}", suite_config.to_yaml()?);
    Ok(())
}
