//! Configuration types for the deployment checker.
//!
//! [`RawConfig`] is the untyped key/value mapping produced by the parser.
//! [`DeploymentConfig`] is the typed view produced by the extractor, where
//! every optional field is an explicit `Option` so that "absent" is never
//! confused with zero.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Characters stripped from both ends of a value before it is interpreted.
pub const QUOTES: &[char] = &['\'', '"'];

/// Strips any run of quote characters from both ends, then surrounding whitespace.
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches(QUOTES).trim()
}

/// Untyped configuration as read from the file.
///
/// Keys and values are already trimmed. Values keep their quotes; stripping
/// happens during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawConfig {
    entries: BTreeMap<String, String>,
}

impl RawConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets a key, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

/// An ordered list of node identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList(Vec<String>);

impl NodeList {
    /// Parses a whitespace-separated node list, ignoring surrounding quotes.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self(
            value
                .trim_matches(QUOTES)
                .split_whitespace()
                .map(String::from)
                .collect(),
        )
    }

    /// Returns the number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over node names in file order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Builds a lookup set of the node names.
    #[must_use]
    pub fn to_set(&self) -> HashSet<&str> {
        self.iter().collect()
    }
}

impl fmt::Display for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// A typed value together with the key it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    /// The configuration key that supplied the value.
    pub key: &'static str,
    /// The typed value.
    pub value: T,
}

impl<T> Sourced<T> {
    /// Wraps a value with its source key.
    #[must_use]
    pub const fn new(key: &'static str, value: T) -> Self {
        Self { key, value }
    }
}

/// Live migration support flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveMigration {
    /// Live migration is supported.
    Yes,
    /// Live migration is not supported.
    No,
}

impl FromStr for LiveMigration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(format!("must be 'yes' or 'no', got '{other}'")),
        }
    }
}

/// Typed deployment configuration.
///
/// Only `storage_nodes` is mandatory. Every other field is `None` when its key
/// is absent from the file. The live migration flag is kept as text because an
/// unknown value is a rule violation rather than an extraction failure.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentConfig {
    /// Every node eligible to host storage (`BRIDGE_LIST`).
    pub storage_nodes: NodeList,
    /// Explicit deployment node selection.
    pub deployment_nodes: Option<Sourced<NodeList>>,
    /// Redundancy-based deployment node selection.
    pub redundancy: Option<Sourced<i64>>,
    /// Deployment timeout in seconds.
    pub timeout: Option<Sourced<i64>>,
    /// Minimum ratio of nodes that must succeed.
    pub min_ratio: Option<Sourced<f64>>,
    /// Minimum number of nodes that must succeed.
    pub min_count: Option<Sourced<i64>>,
    /// Live migration support flag, as written.
    pub live_migration: Option<Sourced<String>>,
}

impl DeploymentConfig {
    /// Creates a configuration with only storage nodes set.
    #[must_use]
    pub const fn new(storage_nodes: NodeList) -> Self {
        Self {
            storage_nodes,
            deployment_nodes: None,
            redundancy: None,
            timeout: None,
            min_ratio: None,
            min_count: None,
            live_migration: None,
        }
    }

    /// Returns the number of storage nodes.
    #[must_use]
    pub fn storage_node_count(&self) -> usize {
        self.storage_nodes.len()
    }
}
