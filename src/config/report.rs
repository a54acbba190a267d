//! Validation report accumulated while checking a configuration.

use serde::Serialize;
use std::fmt;

use crate::error::ConfigError;

/// The rule that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A required key is missing.
    RequiredField,
    /// A value could not be converted to its type.
    MalformedValue,
    /// Exactly one of deployment nodes and redundancy must be configured.
    DeploymentMode,
    /// A deployment node is not a storage node.
    DeploymentSubset,
    /// More deployment nodes than storage nodes.
    DeploymentSize,
    /// Redundancy outside `0..=storage nodes`.
    RedundancyBounds,
    /// Timeout below one second.
    TimeoutBounds,
    /// Minimum ratio outside `0.0..=1.0`.
    MinRatioBounds,
    /// Minimum count outside `0..=storage nodes`.
    MinCountBounds,
    /// Live migration flag is not `yes` or `no`.
    LiveMigrationValue,
}

/// A single recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule that fired.
    pub rule: Rule,
    /// Key the violation concerns, when there is a single one.
    pub field: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating one configuration.
///
/// The verdict is derived from the violation list, so a report is valid
/// exactly when nothing was recorded through [`ValidationReport::add_violation`].
/// Warnings never affect the verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    warnings: Vec<String>,
    halted: bool,
}

impl ValidationReport {
    /// Creates an empty, valid report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
            warnings: Vec::new(),
            halted: false,
        }
    }

    /// Records a violation and marks the report as not valid.
    pub fn add_violation(
        &mut self,
        rule: Rule,
        field: Option<&str>,
        message: impl Into<String>,
    ) {
        self.violations.push(Violation {
            rule,
            field: field.map(String::from),
            message: message.into(),
        });
    }

    /// Records a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records a fatal field error and stops further checks.
    pub fn halt(&mut self, error: &ConfigError) {
        let rule = match error {
            ConfigError::MissingField { .. } => Rule::RequiredField,
            _ => Rule::MalformedValue,
        };
        self.add_violation(rule, error.key(), error.to_string());
        self.halted = true;
    }

    /// Returns true if no violation was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if validation stopped early on a fatal field error.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Violations in the order they were recorded.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Warnings in the order they were recorded.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns the number of violations produced by a given rule.
    #[must_use]
    pub fn count(&self, rule: Rule) -> usize {
        self.violations.iter().filter(|v| v.rule == rule).count()
    }

    /// Returns the verdict word used in output.
    #[must_use]
    pub fn verdict(&self) -> &'static str {
        if self.is_valid() { "valid" } else { "not valid" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(!report.is_halted());
        assert_eq!(report.verdict(), "valid");
    }

    #[test]
    fn test_warning_keeps_report_valid() {
        let mut report = ValidationReport::new();
        report.add_warning("unrecognized key FOO");
        assert!(report.is_valid());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_violation_flips_verdict() {
        let mut report = ValidationReport::new();
        report.add_violation(Rule::TimeoutBounds, Some("DEPLOY_TIMEOUT"), "too small");
        report.add_violation(Rule::MinRatioBounds, None, "too large");
        assert!(!report.is_valid());
        assert_eq!(report.verdict(), "not valid");
        assert_eq!(report.violation_count(), 2);
        assert_eq!(report.count(Rule::TimeoutBounds), 1);
        assert_eq!(report.violations()[1].to_string(), "too large");
    }

    #[test]
    fn test_halt_records_rule_and_key() {
        let mut report = ValidationReport::new();
        report.halt(&ConfigError::missing("BRIDGE_LIST"));
        assert!(report.is_halted());
        assert_eq!(report.count(Rule::RequiredField), 1);
        assert_eq!(report.violations()[0].field.as_deref(), Some("BRIDGE_LIST"));

        let mut report = ValidationReport::new();
        report.halt(&ConfigError::invalid_value("DEPLOY_TIMEOUT", "soon", "a number of seconds"));
        assert_eq!(report.count(Rule::MalformedValue), 1);
    }
}
