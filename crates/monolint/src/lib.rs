//! # monolint
//!
//! Convention linter for monorepos.
//!
//! This is the main facade crate that re-exports core functionality and the
//! built-in rules.
//!
//! ## How it works
//!
//! 1. Every directory below the root is visited in lexicographic order.
//! 2. The effective configuration of each directory is its parent's, with the
//!    directory's own `.monolint.json` / `.monolint.toml` layered on top.
//! 3. A directory holding any of the configured `module-markers` files is a
//!    module. `node_modules`, `.git`, `vendor` and `target` are never visited.
//! 4. Each enabled rule checks the modules and reports findings.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let results = monolint::lint(std::path::Path::new("."))?;
//! for r in results.iter().filter(|r| !r.valid) {
//!     println!("{r}");
//! }
//! ```
//!
//! ## Configuration
//!
//! ```json
//! {
//!   "module-markers": ["package.json", "serverless.yml"],
//!   "rules": {
//!     "serverless-same-name": false,
//!     "gh-workflow-module-prefix": { "required": true, "suffixes": ["-dev", "-prd"] }
//!   }
//! }
//! ```
//!
//! A rule key in a deeper file replaces the inherited value of that key as a
//! whole; other keys keep their inherited values.

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use monolint_core::*;

/// Built-in rules and registry.
pub mod rules {
    pub use monolint_rules::*;
}

mod runner;

pub use runner::{default_config, discover_modules, lint, lint_with_config};
