//! # monolint-rules
//!
//! Built-in lint rules for monolint.
//!
//! ## Available Rules
//!
//! | Name | Kind | Description |
//! |------|------|-------------|
//! | `packagejson-same-name` | per module | `package.json` name equals the module folder name |
//! | `serverless-same-name` | per module | `serverless.yml` service equals the module folder name |
//! | `gh-workflow-module-prefix` | module set | workflow files are prefixed by a module name, optionally required per module |
//!
//! ## Usage
//!
//! ```ignore
//! use monolint_core::Linter;
//! use monolint_rules::all_rules;
//!
//! let linter = Linter::builder()
//!     .root("./monorepo")
//!     .rules(all_rules())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gh_workflow_module_prefix;
mod packagejson_same_name;
mod registry;
mod serverless_same_name;

pub use gh_workflow_module_prefix::{
    workflows_dir, GhWorkflowModulePrefix, GhWorkflowModulePrefixConfig,
};
pub use packagejson_same_name::PackageJsonSameName;
pub use registry::{all_rules, find_rule, rule_names};
pub use serverless_same_name::ServerlessSameName;

/// Re-export core types for convenience.
pub use monolint_core::{Rule, RuleResult};
