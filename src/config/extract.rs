//! Field extraction and type coercion.
//!
//! Turns a [`RawConfig`] into a [`DeploymentConfig`], reading each key once.
//! A missing `BRIDGE_LIST` or a value of the wrong type is returned as a
//! [`ConfigError`]; everything else that is merely worth mentioning goes to the
//! report as a warning.

use std::num::IntErrorKind;
use std::str::FromStr;
use tracing::debug;

use crate::error::ConfigError;

use super::keys::{Field, KeyScheme};
use super::report::ValidationReport;
use super::types::{strip_quotes, DeploymentConfig, NodeList, RawConfig, Sourced};

/// Extracts typed fields from a raw configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor {
    /// Accepted key names.
    scheme: KeyScheme,
}

impl FieldExtractor {
    /// Creates an extractor for the given key scheme.
    #[must_use]
    pub const fn new(scheme: KeyScheme) -> Self {
        Self { scheme }
    }

    /// Extracts every known field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `BRIDGE_LIST` is absent and
    /// [`ConfigError::InvalidValue`] for the first numeric value that does not parse.
    pub fn extract(
        &self,
        raw: &RawConfig,
        report: &mut ValidationReport,
    ) -> Result<DeploymentConfig, ConfigError> {
        self.warn_unrecognized(raw, report);

        let storage = self
            .lookup(raw, Field::StorageNodes, report)
            .ok_or_else(|| ConfigError::missing(self.scheme.preferred_key(Field::StorageNodes)))?;
        let mut config = DeploymentConfig::new(NodeList::parse(storage.value));
        debug!(count = config.storage_node_count(), "Storage nodes extracted");

        if let Some(hosts) = self.lookup(raw, Field::DeploymentNodes, report) {
            let nodes = NodeList::parse(hosts.value);
            if nodes.is_empty() {
                report.add_warning(format!(
                    "{} is set but lists no nodes; treating it as not configured",
                    hosts.key
                ));
            } else {
                config.deployment_nodes = Some(Sourced::new(hosts.key, nodes));
            }
        }

        config.redundancy = self
            .lookup(raw, Field::Redundancy, report)
            .map(|value| coerce_int(value, "an integer"))
            .transpose()?;

        config.timeout = self
            .lookup(raw, Field::Timeout, report)
            .map(|value| coerce_int(value, "a number of seconds"))
            .transpose()?;

        config.min_ratio = self
            .lookup(raw, Field::MinRatio, report)
            .map(|value| coerce(value, "a decimal number"))
            .transpose()?;

        config.min_count = self
            .lookup(raw, Field::MinCount, report)
            .map(|value| coerce_int(value, "an integer"))
            .transpose()?;

        config.live_migration = self
            .lookup(raw, Field::LiveMigration, report)
            .map(|value| Sourced::new(value.key, strip_quotes(value.value).to_string()));

        Ok(config)
    }

    /// Finds the value for a field, warning when synonyms collide.
    fn lookup<'a>(
        &self,
        raw: &'a RawConfig,
        field: Field,
        report: &mut ValidationReport,
    ) -> Option<Sourced<&'a str>> {
        let mut present = self
            .scheme
            .keys(field)
            .into_iter()
            .filter_map(|key| raw.get(key).map(|value| Sourced::new(key, value)));

        let chosen = present.next()?;
        for shadowed in present {
            report.add_warning(format!(
                "{} and {} are both set; using {}",
                chosen.key, shadowed.key, chosen.key
            ));
        }

        debug!(key = chosen.key, ?field, "Resolved configuration key");
        Some(chosen)
    }

    /// Warns about keys the current scheme does not understand.
    fn warn_unrecognized(&self, raw: &RawConfig, report: &mut ValidationReport) {
        for (key, _) in raw.iter() {
            if key.is_empty() {
                report.add_warning("Unrecognized empty key (a line starts with '=')");
            } else if !self.scheme.recognizes(key) {
                report.add_warning(format!(
                    "Unrecognized key {key} (key scheme: {})",
                    self.scheme
                ));
            }
        }
    }
}

/// Parses a quoted or bare scalar into `T`.
fn coerce<T: FromStr>(
    value: Sourced<&str>,
    expected: &'static str,
) -> Result<Sourced<T>, ConfigError> {
    strip_quotes(value.value)
        .parse()
        .map(|parsed| Sourced::new(value.key, parsed))
        .map_err(|_| ConfigError::invalid_value(value.key, value.value, expected))
}

/// Parses an integer, saturating at the `i64` limits.
///
/// A well-formed integer of any size is a number; whether it is in range is
/// for the bounds rules to decide.
fn coerce_int(value: Sourced<&str>, expected: &'static str) -> Result<Sourced<i64>, ConfigError> {
    let parsed = match strip_quotes(value.value).parse::<i64>() {
        Ok(parsed) => parsed,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return Err(ConfigError::invalid_value(value.key, value.value, expected)),
        },
    };
    Ok(Sourced::new(value.key, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, &str)]) -> RawConfig {
        entries.iter().copied().collect()
    }

    fn extract(entries: &[(&str, &str)]) -> (Result<DeploymentConfig, ConfigError>, ValidationReport) {
        let mut report = ValidationReport::new();
        let result = FieldExtractor::default().extract(&raw(entries), &mut report);
        (result, report)
    }

    #[test]
    fn test_missing_bridge_list() {
        let (result, _) = extract(&[("DEPLOY_REDUNDANCY", "2")]);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { ref key }) if key == "BRIDGE_LIST"
        ));
    }

    #[test]
    fn test_optional_fields_absent() {
        let (result, report) = extract(&[("BRIDGE_LIST", "'a b c'")]);
        let config = result.unwrap();
        assert_eq!(config.storage_node_count(), 3);
        assert!(config.deployment_nodes.is_none());
        assert!(config.redundancy.is_none());
        assert!(config.timeout.is_none());
        assert!(config.min_ratio.is_none());
        assert!(config.min_count.is_none());
        assert!(config.live_migration.is_none());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_zero_redundancy_is_configured() {
        let (result, _) = extract(&[("BRIDGE_LIST", "a"), ("DEPLOY_REDUNDANCY", "0")]);
        let redundancy = result.unwrap().redundancy.unwrap();
        assert_eq!(redundancy.value, 0);
        assert_eq!(redundancy.key, "DEPLOY_REDUNDANCY");
    }

    #[test]
    fn test_quoted_scalars() {
        let (result, _) = extract(&[
            ("BRIDGE_LIST", "a b"),
            ("DEPLOY_TIMEOUT", "'600'"),
            ("DEPLOY_MIN_RATIO", "\"0.75\""),
            ("DEPLOY_SUPPORT_LIVE_MIGRATION", "'yes'"),
        ]);
        let config = result.unwrap();
        assert_eq!(config.timeout.unwrap().value, 600);
        assert!((config.min_ratio.unwrap().value - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.live_migration.unwrap().value, "yes");
    }

    #[test]
    fn test_malformed_redundancy() {
        let (result, _) = extract(&[("BRIDGE_LIST", "a b"), ("DEPLOY_REDUNDANCY", "two")]);
        let err = result.unwrap_err();
        assert_eq!(err.key(), Some("DEPLOY_REDUNDANCY"));
        assert_eq!(err.to_string(), "DEPLOY_REDUNDANCY must be an integer, got 'two'");
    }

    #[test]
    fn test_malformed_optional_scalars() {
        let (result, _) = extract(&[("BRIDGE_LIST", "a"), ("DEPLOY_TIMEOUT", "1.5")]);
        assert_eq!(result.unwrap_err().key(), Some("DEPLOY_TIMEOUT"));

        let (result, _) = extract(&[("BRIDGE_LIST", "a"), ("DEPLOY_MIN_RATIO", "half")]);
        assert_eq!(result.unwrap_err().key(), Some("DEPLOY_MIN_RATIO"));

        let (result, _) = extract(&[("BRIDGE_LIST", "a"), ("DEPLOY_MIN_COUNT", "")]);
        assert_eq!(result.unwrap_err().key(), Some("DEPLOY_MIN_COUNT"));
    }

    #[test]
    fn test_oversized_integers_saturate() {
        let (result, _) = extract(&[
            ("BRIDGE_LIST", "a"),
            ("DEPLOY_TIMEOUT", "99999999999999999999"),
            ("DEPLOY_MIN_COUNT", "'-99999999999999999999'"),
        ]);
        let config = result.unwrap();
        assert_eq!(config.timeout.unwrap().value, i64::MAX);
        assert_eq!(config.min_count.unwrap().value, i64::MIN);
    }

    #[test]
    fn test_drbd_synonyms() {
        let (result, report) = extract(&[
            ("BRIDGE_LIST", "a b c"),
            ("DRBD_DEPLOYMENT_NODES", "a b"),
            ("DRBD_MIN_COUNT", "1"),
        ]);
        let config = result.unwrap();
        assert_eq!(config.deployment_nodes.unwrap().key, "DRBD_DEPLOYMENT_NODES");
        assert_eq!(config.min_count.unwrap().value, 1);
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_synonym_collision_prefers_deploy_key() {
        let (result, report) = extract(&[
            ("BRIDGE_LIST", "a b c"),
            ("DEPLOY_REDUNDANCY", "2"),
            ("DRBD_REDUNDANCY", "3"),
        ]);
        assert_eq!(result.unwrap().redundancy.unwrap().value, 2);
        assert_eq!(
            report.warnings(),
            ["DEPLOY_REDUNDANCY and DRBD_REDUNDANCY are both set; using DEPLOY_REDUNDANCY"]
        );
    }

    #[test]
    fn test_scheme_restricts_keys() {
        let mut report = ValidationReport::new();
        let config = FieldExtractor::new(KeyScheme::Deploy)
            .extract(&raw(&[("BRIDGE_LIST", "a"), ("DRBD_REDUNDANCY", "1")]), &mut report)
            .unwrap();
        assert!(config.redundancy.is_none());
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].starts_with("Unrecognized key DRBD_REDUNDANCY"));
    }

    #[test]
    fn test_empty_key_is_unrecognized() {
        let (result, report) = extract(&[("BRIDGE_LIST", "a"), ("", "value")]);
        assert!(result.is_ok());
        assert_eq!(
            report.warnings(),
            ["Unrecognized empty key (a line starts with '=')"]
        );
        assert!(report.is_valid());
    }

    #[test]
    fn test_empty_hosts_treated_as_absent() {
        let (result, report) = extract(&[("BRIDGE_LIST", "a"), ("DEPLOY_HOSTS", "''")]);
        assert!(result.unwrap().deployment_nodes.is_none());
        assert_eq!(report.warnings().len(), 1);
        assert!(report.is_valid());
    }
}
