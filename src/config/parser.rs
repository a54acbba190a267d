//! Configuration parser for `KEY=VALUE` deployment files.
//!
//! Each non-blank line is split on its first `=`; key and value are trimmed.
//! A later assignment to the same key replaces the earlier one.

use crate::error::{ConfigError, DeployCheckError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use super::types::RawConfig;

/// Configuration parser for loading deployment configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigParser;

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line cannot be parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RawConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(DeployCheckError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DeployCheckError::Config(ConfigError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        self.parse_str(&content, Some(path))
    }

    /// Parses configuration from a string.
    ///
    /// # Errors
    ///
    /// Returns an error on the first non-blank line that has no `=`.
    pub fn parse_str(&self, content: &str, source: Option<&Path>) -> Result<RawConfig> {
        debug!("Parsing key=value configuration");

        let mut config = RawConfig::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let location = || {
                let line_no = index + 1;
                Some(source.map_or_else(
                    || format!("line {line_no}"),
                    |p| format!("{}:{line_no}", p.display()),
                ))
            };

            let Some((key, value)) = line.split_once('=') else {
                return Err(DeployCheckError::Config(ConfigError::parse(
                    format!("expected KEY=VALUE, got '{line}'"),
                    location(),
                )));
            };

            let key = key.trim();
            if let Some(previous) = config.insert(key, value.trim()) {
                warn!(key, previous = %previous, "Duplicate key, keeping the later value");
            }
        }

        debug!(keys = config.len(), "Parsed configuration");
        Ok(config)
    }
}
