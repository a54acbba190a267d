// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # deploycheck
//!
//! Pre-flight validation for storage cluster deployment configuration files.
//!
//! ## Overview
//!
//! A deployment file is a flat list of `KEY=VALUE` assignments naming the
//! storage nodes (`BRIDGE_LIST`) and how deployment nodes are selected, either
//! explicitly (`DEPLOY_HOSTS`) or by count (`DEPLOY_REDUNDANCY`). deploycheck
//! reads the file, checks every field and cross-field rule, and reports each
//! violation together with a final verdict.
//!
//! ## Pipeline
//!
//! 1. **Parse**: [`config::ConfigParser`] builds a [`config::RawConfig`]
//! 2. **Extract**: [`config::FieldExtractor`] produces a typed [`config::DeploymentConfig`]
//! 3. **Check**: [`config::ConfigValidator`] applies the rules into a [`config::ValidationReport`]
//! 4. **Render**: [`cli::OutputFormatter`] prints the report as text or JSON
//!
//! A missing `BRIDGE_LIST` or a value of the wrong type stops validation
//! immediately. Out-of-range and inconsistent values are collected so that
//! every problem is reported in one run.
//!
//! ## Modules
//!
//! - [`config`]: Parsing, extraction and validation
//! - [`cli`]: Command-line interface and output
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```
//! use deploycheck::{ConfigParser, ConfigValidator};
//!
//! let raw = ConfigParser::new()
//!     .parse_str("BRIDGE_LIST='node-1 node-2 node-3'\nDEPLOY_HOSTS='node-1 node-2'\n", None)
//!     .unwrap();
//! let report = ConfigValidator::new().validate(&raw);
//! assert!(report.is_valid());
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use config::{
    ConfigHasher, ConfigParser, ConfigValidator, DeploymentConfig, KeyScheme, RawConfig, Rule,
    ValidationReport,
};
pub use error::{ConfigError, DeployCheckError, Result};
