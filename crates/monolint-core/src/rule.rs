//! Rule trait for defining lint rules.

use crate::config::{Configuration, RuleSetting};
use crate::context::LintContext;
use crate::module::Module;
use crate::types::RuleResult;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Outcome of a rule invocation.
///
/// `Ok(None)` means the rule does not apply at this granularity.
pub type RuleOutcome = Result<Option<Vec<RuleResult>>, RuleError>;

/// A named, stateless lint rule.
///
/// Rules may implement a per-module check, a check over the whole module set,
/// or both. The set-wide check exists for relational rules (uniqueness across
/// modules, orphaned files) that cannot be decided from one module alone.
///
/// # Example
///
/// ```ignore
/// use monolint_core::{Module, Configuration, Rule, RuleExample, RuleOutcome, RuleResult};
///
/// pub struct RequireReadme;
///
/// impl Rule for RequireReadme {
///     fn name(&self) -> &'static str { "module-readme" }
///
///     fn check(&self, module: &Module, _base: &Configuration) -> RuleOutcome {
///         let readme = module.path.join("README.md");
///         let result = if readme.is_file() {
///             RuleResult::valid(self.name(), &readme, "README found")
///         } else {
///             RuleResult::invalid(self.name(), &readme, "Module should have a README.md")
///         };
///         Ok(Some(vec![result.with_module(module)]))
///     }
///
///     fn doc_markdown(&self) -> &'static str { "* Requires a README.md per module" }
///     fn doc_example_configs(&self) -> Vec<RuleExample> { vec![] }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "packagejson-same-name").
    fn name(&self) -> &'static str;

    /// Checks a single module.
    ///
    /// Only called for modules that have this rule enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be evaluated.
    fn check(&self, _module: &Module, _base_config: &Configuration) -> RuleOutcome {
        Ok(None)
    }

    /// Checks the set of modules that have this rule enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be evaluated.
    fn check_modules(&self, _modules: &[&Module], _ctx: &LintContext<'_>) -> RuleOutcome {
        Ok(None)
    }

    /// Returns a markdown description of the rule.
    fn doc_markdown(&self) -> &'static str;

    /// Returns example configurations for the rule.
    fn doc_example_configs(&self) -> Vec<RuleExample>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A documented example configuration for a rule.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RuleExample {
    /// What the configuration does.
    pub description: &'static str,
    /// The configuration value.
    pub config: RuleSetting,
}

impl RuleExample {
    /// Creates a new example.
    #[must_use]
    pub fn new(description: &'static str, config: RuleSetting) -> Self {
        Self {
            description,
            config,
        }
    }
}

/// Expands a rule setting into the rule's options type.
///
/// # Errors
///
/// Returns [`RuleError::InvalidOptions`] if the options object does not fit `T`.
pub fn expand_options<T>(rule: &str, setting: &RuleSetting) -> Result<Option<T>, RuleError>
where
    T: DeserializeOwned + Default,
{
    setting.expand().map_err(|e| RuleError::InvalidOptions {
        rule: rule.to_string(),
        message: e.to_string(),
    })
}

/// Errors raised while evaluating a rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// IO error while inspecting the tree.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The rule's options could not be expanded.
    #[error("Invalid options for rule {rule}: {message}")]
    InvalidOptions {
        /// Rule name.
        rule: String,
        /// What was wrong.
        message: String,
    },
}
