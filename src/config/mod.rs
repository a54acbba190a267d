//! Configuration module for the deployment checker.
//!
//! This module handles all configuration-related functionality:
//! - Parsing `KEY=VALUE` deployment files
//! - Extracting typed fields under a key naming scheme
//! - Validating cross-field rules into a report
//! - Computing configuration fingerprints

mod extract;
mod hash;
mod keys;
mod parser;
mod report;
mod types;
mod validator;

pub use extract::FieldExtractor;
pub use hash::ConfigHasher;
pub use keys::{Field, KeyScheme};
pub use parser::ConfigParser;
pub use report::{Rule, ValidationReport, Violation};
pub use types::{
    strip_quotes, DeploymentConfig, LiveMigration, NodeList, RawConfig, Sourced, QUOTES,
};
pub use validator::ConfigValidator;
