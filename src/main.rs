//! deploycheck CLI entrypoint.
//!
//! Exit codes: 0 when the configuration is valid, 1 when it is not, 2 when the
//! file could not be read or parsed.

use std::io::Write;
use std::process::ExitCode;

use deploycheck::cli::{Cli, OutputFormatter};
use deploycheck::config::{ConfigParser, ConfigValidator, ValidationReport};
use deploycheck::error::Result;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Exit code for a configuration that violates at least one rule.
const EXIT_INVALID: u8 = 1;

/// Exit code for a file that could not be read or parsed.
const EXIT_INPUT_ERROR: u8 = 2;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let formatter = OutputFormatter::new(cli.output)
        .with_warnings(cli.warnings)
        .with_echo(!cli.no_echo);

    match run(&cli, &formatter) {
        Ok(report) if report.is_valid() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_INVALID),
        Err(e) => {
            error!("{e}");
            let output = formatter.format_fatal(&cli.config, &e);
            let _ = writeln!(std::io::stdout().lock(), "{}", output.trim_end());
            if e.is_input_error() {
                ExitCode::from(EXIT_INPUT_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug level.
/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Parses, validates and prints the report for the configured file.
fn run(cli: &Cli, formatter: &OutputFormatter) -> Result<ValidationReport> {
    let raw = ConfigParser::new().load_file(&cli.config)?;
    debug!(keys = raw.len(), scheme = %cli.keys, "Validating configuration");

    let report = ConfigValidator::new().with_scheme(cli.keys).validate(&raw);

    let output = formatter.format_report(&cli.config, &raw, &report);
    writeln!(std::io::stdout().lock(), "{}", output.trim_end())?;

    Ok(report)
}
