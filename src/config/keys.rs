//! Recognized configuration keys and naming schemes.
//!
//! The same settings are known under two prefixes, `DEPLOY_*` and `DRBD_*`.
//! A [`KeyScheme`] decides which names are accepted and which one wins when
//! both are present.

use serde::Serialize;
use std::fmt;

/// A setting the checker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// All storage nodes.
    StorageNodes,
    /// Explicit deployment nodes.
    DeploymentNodes,
    /// Redundancy level.
    Redundancy,
    /// Deployment timeout.
    Timeout,
    /// Minimum success ratio.
    MinRatio,
    /// Minimum success count.
    MinCount,
    /// Live migration support.
    LiveMigration,
}

impl Field {
    /// Every field, in extraction order.
    pub const ALL: [Self; 7] = [
        Self::StorageNodes,
        Self::DeploymentNodes,
        Self::Redundancy,
        Self::Timeout,
        Self::MinRatio,
        Self::MinCount,
        Self::LiveMigration,
    ];

    /// Key under the `DEPLOY_*` naming.
    #[must_use]
    pub const fn deploy_key(self) -> &'static str {
        match self {
            Self::StorageNodes => "BRIDGE_LIST",
            Self::DeploymentNodes => "DEPLOY_HOSTS",
            Self::Redundancy => "DEPLOY_REDUNDANCY",
            Self::Timeout => "DEPLOY_TIMEOUT",
            Self::MinRatio => "DEPLOY_MIN_RATIO",
            Self::MinCount => "DEPLOY_MIN_COUNT",
            Self::LiveMigration => "DEPLOY_SUPPORT_LIVE_MIGRATION",
        }
    }

    /// Key under the `DRBD_*` naming, if the field has one.
    ///
    /// `BRIDGE_LIST` and `DEPLOY_TIMEOUT` are shared by both schemes.
    #[must_use]
    pub const fn drbd_key(self) -> Option<&'static str> {
        match self {
            Self::StorageNodes | Self::Timeout => None,
            Self::DeploymentNodes => Some("DRBD_DEPLOYMENT_NODES"),
            Self::Redundancy => Some("DRBD_REDUNDANCY"),
            Self::MinRatio => Some("DRBD_MIN_RATIO"),
            Self::MinCount => Some("DRBD_MIN_COUNT"),
            Self::LiveMigration => Some("DRBD_SUPPORT_LIVE_MIGRATION"),
        }
    }
}

/// Which key names are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// Only `DEPLOY_*` names.
    Deploy,
    /// Only `DRBD_*` names, plus the shared keys.
    Drbd,
    /// Both names; `DEPLOY_*` wins when both are set.
    #[default]
    Any,
}

impl KeyScheme {
    /// Returns the accepted keys for a field, most preferred first.
    #[must_use]
    pub fn keys(self, field: Field) -> Vec<&'static str> {
        let deploy = field.deploy_key();
        match (self, field.drbd_key()) {
            (Self::Deploy, _) | (_, None) => vec![deploy],
            (Self::Drbd, Some(drbd)) => vec![drbd],
            (Self::Any, Some(drbd)) => vec![deploy, drbd],
        }
    }

    /// Returns the name used in messages when the field was not read from any key.
    #[must_use]
    pub fn preferred_key(self, field: Field) -> &'static str {
        match (self, field.drbd_key()) {
            (Self::Drbd, Some(drbd)) => drbd,
            _ => field.deploy_key(),
        }
    }

    /// Returns true if the key is understood under this scheme.
    #[must_use]
    pub fn recognizes(self, key: &str) -> bool {
        Field::ALL
            .iter()
            .any(|field| self.keys(*field).contains(&key))
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deploy => write!(f, "deploy"),
            Self::Drbd => write!(f, "drbd"),
            Self::Any => write!(f, "any"),
        }
    }
}
