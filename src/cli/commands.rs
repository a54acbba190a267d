//! CLI argument definitions.
//!
//! This module defines the command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::KeyScheme;

/// deploycheck - Validate a storage deployment configuration before provisioning.
#[derive(Parser, Debug)]
#[command(name = "deploycheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(env = "DEPLOYCHECK_CONFIG")]
    pub config: PathBuf,

    /// Accepted key names (deploy, drbd, any).
    #[arg(short, long, env = "DEPLOYCHECK_KEYS", default_value = "any")]
    pub keys: KeyScheme,

    /// Output format (text, json).
    #[arg(long, env = "DEPLOYCHECK_OUTPUT", default_value = "text")]
    pub output: OutputFormat,

    /// Show warnings alongside violations.
    #[arg(short, long)]
    pub warnings: bool,

    /// Do not echo the parsed configuration.
    #[arg(long)]
    pub no_echo: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}
