//! Configuration fingerprints.
//!
//! A fingerprint identifies the effective content of a configuration file,
//! independent of line order, blank lines and duplicate assignments.

use sha2::{Digest, Sha256};

use super::types::RawConfig;

/// Hasher for computing configuration fingerprints.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigHasher;

impl ConfigHasher {
    /// Creates a new configuration hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes a hex-encoded SHA-256 digest of the effective key/value pairs.
    #[must_use]
    pub fn hash_config(&self, config: &RawConfig) -> String {
        let mut hasher = Sha256::new();

        // Entries iterate in key order; NUL separates fields.
        for (key, value) in config.iter() {
            hasher.update(key.as_bytes());
            hasher.update([0u8]);
            hasher.update(value.as_bytes());
            hasher.update([0u8]);
        }

        hex::encode(hasher.finalize())
    }

    /// Returns the first eight characters of a fingerprint.
    #[must_use]
    pub fn short(hash: &str) -> &str {
        hash.get(..8).unwrap_or(hash)
    }
}
