//! # monolint-core
//!
//! Core framework for linting monorepo conventions.
//!
//! This crate provides the building blocks shared by every rule:
//!
//! - [`Configuration`] and [`RuleSetting`] for layered, per-rule configuration
//! - [`resolver`] for resolving the effective configuration of a directory
//! - [`discovery`] for finding module roots through marker files
//! - [`Rule`] trait for per-module and set-wide checks
//! - [`Linter`] for orchestrating lint execution
//! - [`RuleResult`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use monolint_core::{Configuration, Linter};
//!
//! let linter = Linter::builder()
//!     .root("./monorepo")
//!     .config(Configuration::new().with_markers(["package.json"]))
//!     .rule(MyRule)
//!     .build()?;
//!
//! let report = linter.lint()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod linter;
mod module;
mod rule;
mod types;

pub mod discovery;
pub mod resolver;

pub use config::{ConfigError, ConfigFormat, Configuration, RuleSetting, DEFAULT_MODULE_MARKERS};
pub use context::LintContext;
pub use discovery::{discover, scan, DiscoveryError, Scan, IGNORED_FOLDERS};
pub use linter::{LintError, Linter, LinterBuilder};
pub use module::Module;
pub use rule::{expand_options, Rule, RuleBox, RuleError, RuleExample, RuleOutcome};
pub use types::{FindingDiagnostic, LintReport, RuleResult};
