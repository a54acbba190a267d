//! Output formatting for validation reports.
//!
//! Text output is the configuration echo, one line per violation, and a final
//! verdict line. JSON output carries the same information as one document.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tabled::{Table, Tabled};

use crate::config::{ConfigHasher, RawConfig, ValidationReport, Violation};
use crate::error::DeployCheckError;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Whether text output lists warnings.
    show_warnings: bool,
    /// Whether the parsed configuration is echoed.
    echo: bool,
}

/// Configuration entry row for table display.
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl OutputFormatter {
    /// Creates a new output formatter that echoes the configuration.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            show_warnings: false,
            echo: true,
        }
    }

    /// Sets whether warnings are listed in text output.
    #[must_use]
    pub const fn with_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }

    /// Sets whether the parsed configuration is echoed.
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Formats a complete validation report.
    #[must_use]
    pub fn format_report(
        &self,
        source: &Path,
        raw: &RawConfig,
        report: &ValidationReport,
    ) -> String {
        let config_hash = ConfigHasher::new().hash_config(raw);
        match self.format {
            OutputFormat::Json => {
                let json = ReportJson {
                    source: source.display().to_string(),
                    config_hash,
                    config: self.echo.then_some(raw),
                    valid: report.is_valid(),
                    halted: report.is_halted(),
                    violations: report.violations(),
                    warnings: report.warnings(),
                };
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => self.format_report_text(source, raw, &config_hash, report),
        }
    }

    /// Formats a report as text.
    fn format_report_text(
        &self,
        source: &Path,
        raw: &RawConfig,
        config_hash: &str,
        report: &ValidationReport,
    ) -> String {
        let mut output = String::new();

        if self.echo {
            output.push_str(&Self::format_echo(source, raw, config_hash));
            output.push('\n');
        }

        for violation in report.violations() {
            let _ = writeln!(output, "{} {violation}", "✗".red());
        }

        if report.is_halted() {
            let _ = writeln!(
                output,
                "{}",
                "Validation stopped early; remaining rules were not checked.".dimmed()
            );
        }

        if self.show_warnings {
            for warning in report.warnings() {
                let _ = writeln!(output, "{} {warning}", "⚠".yellow());
            }
        }

        let _ = writeln!(output, "\n{}", Self::verdict_line(report.is_valid()));
        output
    }

    /// Formats the parsed configuration as a key/value table.
    fn format_echo(source: &Path, raw: &RawConfig, config_hash: &str) -> String {
        let mut output = format!(
            "Configuration: {} (hash {})\n",
            source.display(),
            ConfigHasher::short(config_hash)
        );

        if raw.is_empty() {
            output.push_str("   (no entries)\n");
            return output;
        }

        let rows: Vec<EntryRow> = raw
            .iter()
            .map(|(key, value)| EntryRow {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');
        output
    }

    /// Formats a fatal input error followed by the forced verdict.
    #[must_use]
    pub fn format_fatal(&self, source: &Path, error: &DeployCheckError) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "source": source.display().to_string(),
                    "valid": false,
                    "halted": true,
                    "error": error.to_string(),
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                format!("{} Error: {error}\n\n{}\n", "✗".red(), Self::verdict_line(false))
            }
        }
    }

    /// Returns the colored verdict line.
    fn verdict_line(valid: bool) -> String {
        if valid {
            "Your configuration is valid.".green().bold().to_string()
        } else {
            "Your configuration is not valid.".red().bold().to_string()
        }
    }
}

// JSON serialization helpers

#[derive(Serialize)]
struct ReportJson<'a> {
    source: String,
    config_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a RawConfig>,
    valid: bool,
    halted: bool,
    violations: &'a [Violation],
    warnings: &'a [String],
}
