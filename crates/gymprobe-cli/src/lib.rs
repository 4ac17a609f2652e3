//! gymprobe CLI library
//!
//! Command-line front end for the gymprobe scenario catalogue: argument
//! parsing, configuration layering, progress output and the JSON report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, ListArgs, ReportFormatArg, RunArgs};
pub use config::{apply_run_args, CliConfig, ColorChoice, Verbosity, DEFAULT_CONFIG_FILE};
pub use error::{CliError, CliResult};
pub use output::{render_json, OutputFormat, ProgressReporter};
pub use runner::TestRunner;
