//! Configuration validation for storage deployments.
//!
//! Extraction runs first; if it fails the report is halted with a single
//! violation. Otherwise every cross-field rule runs in a fixed order and each
//! failure is appended, so one pass reports everything an operator has to fix.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::extract::FieldExtractor;
use super::keys::{Field, KeyScheme};
use super::report::{Rule, ValidationReport};
use super::types::{DeploymentConfig, LiveMigration, RawConfig};

/// Validator for deployment configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator {
    /// Accepted key names.
    scheme: KeyScheme,
}

impl ConfigValidator {
    /// Creates a validator accepting both `DEPLOY_*` and `DRBD_*` names.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scheme: KeyScheme::Any,
        }
    }

    /// Restricts the validator to a key scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: KeyScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Validates a raw configuration.
    #[must_use]
    pub fn validate(&self, raw: &RawConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        let config = match FieldExtractor::new(self.scheme).extract(raw, &mut report) {
            Ok(config) => config,
            Err(e) => {
                warn!("Stopping validation: {e}");
                report.halt(&e);
                return report;
            }
        };

        self.check_rules(&config, &mut report);

        if report.is_valid() {
            info!("Configuration validation passed");
        } else {
            info!(
                violations = report.violation_count(),
                "Configuration validation failed"
            );
        }
        report
    }

    /// Runs the cross-field rules against an already extracted configuration.
    pub fn check_rules(&self, config: &DeploymentConfig, report: &mut ValidationReport) {
        self.check_deployment_mode(config, report);
        Self::check_deployment_subset(config, report);
        Self::check_redundancy(config, report);
        Self::check_timeout(config, report);
        Self::check_min_ratio(config, report);
        Self::check_min_count(config, report);
        Self::check_live_migration(config, report);
    }

    /// Exactly one of deployment nodes and redundancy must be configured.
    fn check_deployment_mode(&self, config: &DeploymentConfig, report: &mut ValidationReport) {
        let has_hosts = config.deployment_nodes.is_some();
        let has_redundancy = config.redundancy.is_some();
        debug!(has_hosts, has_redundancy, "Checking deployment mode");

        if has_hosts == has_redundancy {
            let hosts_key = config
                .deployment_nodes
                .as_ref()
                .map_or_else(|| self.scheme.preferred_key(Field::DeploymentNodes), |s| s.key);
            let redundancy_key = config
                .redundancy
                .as_ref()
                .map_or_else(|| self.scheme.preferred_key(Field::Redundancy), |s| s.key);
            report.add_violation(
                Rule::DeploymentMode,
                None,
                format!(
                    "You must have one and only one of the following configured: \
                     {hosts_key} / {redundancy_key}."
                ),
            );
        }
    }

    /// Deployment nodes must be a subset of the storage nodes.
    fn check_deployment_subset(config: &DeploymentConfig, report: &mut ValidationReport) {
        let Some(hosts) = &config.deployment_nodes else {
            return;
        };
        let storage: HashSet<&str> = config.storage_nodes.to_set();

        for node in hosts.value.iter() {
            if !storage.contains(node) {
                report.add_violation(
                    Rule::DeploymentSubset,
                    Some(hosts.key),
                    format!(
                        "{node} not found in bridge list! \
                         Nodes in {} must be included in BRIDGE_LIST.",
                        hosts.key
                    ),
                );
            }
        }

        if hosts.value.len() > config.storage_node_count() {
            report.add_violation(
                Rule::DeploymentSize,
                Some(hosts.key),
                format!(
                    "{} contains more nodes than BRIDGE_LIST ({} > {}). \
                     BRIDGE_LIST must contain all storage nodes.",
                    hosts.key,
                    hosts.value.len(),
                    config.storage_node_count()
                ),
            );
        }
    }

    /// Redundancy must lie within `0..=storage nodes`.
    fn check_redundancy(config: &DeploymentConfig, report: &mut ValidationReport) {
        let Some(redundancy) = &config.redundancy else {
            return;
        };
        if !within_node_count(redundancy.value, config.storage_node_count()) {
            report.add_violation(
                Rule::RedundancyBounds,
                Some(redundancy.key),
                format!(
                    "{} must be between 0 and the number of nodes in BRIDGE_LIST ({}), got {}.",
                    redundancy.key,
                    config.storage_node_count(),
                    redundancy.value
                ),
            );
        }
    }

    /// Timeout must be at least one second.
    fn check_timeout(config: &DeploymentConfig, report: &mut ValidationReport) {
        if let Some(timeout) = &config.timeout
            && timeout.value < 1
        {
            report.add_violation(
                Rule::TimeoutBounds,
                Some(timeout.key),
                format!(
                    "{} must be a positive integer, got {}.",
                    timeout.key, timeout.value
                ),
            );
        }
    }

    /// Minimum ratio must lie within `0.0..=1.0`.
    fn check_min_ratio(config: &DeploymentConfig, report: &mut ValidationReport) {
        if let Some(ratio) = &config.min_ratio
            && !(0.0..=1.0).contains(&ratio.value)
        {
            report.add_violation(
                Rule::MinRatioBounds,
                Some(ratio.key),
                format!("{} must be between 0.0 and 1.0, got {}.", ratio.key, ratio.value),
            );
        }
    }

    /// Minimum count must lie within `0..=storage nodes`.
    fn check_min_count(config: &DeploymentConfig, report: &mut ValidationReport) {
        if let Some(count) = &config.min_count
            && !within_node_count(count.value, config.storage_node_count())
        {
            report.add_violation(
                Rule::MinCountBounds,
                Some(count.key),
                format!(
                    "{} must be between 0 and the number of storage nodes ({}), got {}.",
                    count.key,
                    config.storage_node_count(),
                    count.value
                ),
            );
        }
    }

    /// Live migration flag must be `yes` or `no`.
    fn check_live_migration(config: &DeploymentConfig, report: &mut ValidationReport) {
        if let Some(flag) = &config.live_migration
            && let Err(reason) = flag.value.parse::<LiveMigration>()
        {
            report.add_violation(
                Rule::LiveMigrationValue,
                Some(flag.key),
                format!("{} {reason}.", flag.key),
            );
        }
    }
}

/// Returns true if `value` lies within `0..=node_count`.
fn within_node_count(value: i64, node_count: usize) -> bool {
    i64::try_from(node_count).is_ok_and(|max| (0..=max).contains(&value))
}
