//! CLI module for the deploycheck tool.
//!
//! This module provides argument parsing and report rendering.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat};
pub use output::OutputFormatter;
