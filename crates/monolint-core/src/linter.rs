//! Lint orchestration: discovery, rule applicability, and result ordering.

use crate::config::{ConfigError, Configuration};
use crate::context::LintContext;
use crate::discovery::{self, DiscoveryError};
use crate::module::Module;
use crate::resolver;
use crate::rule::{Rule, RuleBox, RuleOutcome};
use crate::types::{LintReport, RuleResult};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a lint run.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum LintError {
    /// IO error resolving the scan root.
    #[error("IO error: {0}")]
    #[diagnostic(code(monolint::io))]
    Io(#[from] std::io::Error),

    /// Module discovery failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration of the scan root could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Configuration references a rule that is not registered.
    #[error("Unknown rule `{rule}` configured in {path}")]
    #[diagnostic(
        code(monolint::unknown_rule),
        help("run `monolint list-rules` to see the available rules")
    )]
    UnknownRule {
        /// Rule name found in configuration.
        rule: String,
        /// Configuration file naming the rule, or the scan root when the
        /// top-level configuration names it.
        path: PathBuf,
    },
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    config: Option<Configuration>,
    verbose: bool,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to lint.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule. Rules run in the order they are added.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets the top-level configuration.
    #[must_use]
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the verbose flag passed to rules.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined for a
    /// relative root.
    pub fn build(self) -> Result<Linter, LintError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        Ok(Linter {
            root,
            rules: self.rules,
            config: self.config.unwrap_or_default(),
            verbose: self.verbose,
        })
    }
}

/// Runs registered rules over the modules of a tree.
///
/// Use [`Linter::builder()`] to construct an instance.
///
/// Findings are ordered in two phases. First every rule's set-wide check, in
/// rule order. Then, for each module in discovery order, every enabled rule's
/// per-module check, in rule order.
pub struct Linter {
    root: PathBuf,
    rules: Vec<RuleBox>,
    config: Configuration,
    verbose: bool,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the root directory being linted.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Discovers the modules of the tree without running rules.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails.
    pub fn discover(&self) -> Result<Vec<Module>, LintError> {
        Ok(discovery::discover(&self.root, &self.config)?)
    }

    /// Lints the tree and returns the findings.
    ///
    /// A rule that fails to evaluate does not stop the run: its error becomes
    /// a single invalid finding for that rule.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or discovery fails, or if the
    /// top-level configuration or any local file in the tree names an
    /// unregistered rule, even one with no module below it.
    pub fn lint(&self) -> Result<LintReport, LintError> {
        info!("Starting lint at {}", self.root.display());

        let base_config = resolver::resolve(&self.root, &self.config)?;

        // Every rule key comes from the top-level configuration or from one
        // local file, so checking those covers each resolved configuration.
        let discovery::Scan {
            modules,
            local_configs,
        } = discovery::scan(&self.root, &self.config)?;
        self.validate_rule_names(&self.root, &self.config)?;
        for (path, local) in &local_configs {
            self.validate_rule_names(path, local)?;
        }

        let ctx = LintContext::new(&self.root, &base_config).with_verbose(self.verbose);
        let mut report = LintReport::new();
        report.modules_checked = modules.len();

        for rule in &self.rules {
            let enabled: Vec<&Module> = modules
                .iter()
                .filter(|m| m.is_rule_enabled(rule.name()))
                .collect();
            debug!("Running {} over {} module(s)", rule.name(), enabled.len());

            let outcome = rule.check_modules(&enabled, &ctx);
            self.collect(rule.as_ref(), outcome, &mut report.results);
        }

        for module in &modules {
            for rule in &self.rules {
                if !module.is_rule_enabled(rule.name()) {
                    debug!("Skipping disabled rule {} for {}", rule.name(), module.name);
                    continue;
                }

                let outcome = rule.check(module, &base_config);
                self.collect(rule.as_ref(), outcome, &mut report.results);
            }
        }

        let (valid, invalid) = report.count_by_validity();
        info!(
            "Lint complete: {} valid, {} invalid finding(s) in {} module(s)",
            valid, invalid, report.modules_checked
        );

        Ok(report)
    }

    /// Appends a rule's findings, turning a rule error into an invalid finding.
    fn collect(&self, rule: &dyn Rule, outcome: RuleOutcome, results: &mut Vec<RuleResult>) {
        match outcome {
            Ok(Some(findings)) => results.extend(findings),
            Ok(None) => {}
            Err(e) => {
                warn!("Rule {} failed: {}", rule.name(), e);
                results.push(RuleResult::invalid(
                    rule.name(),
                    &self.root,
                    format!("rule execution failed: {e}"),
                ));
            }
        }
    }

    fn validate_rule_names(&self, path: &Path, config: &Configuration) -> Result<(), LintError> {
        for name in config.rules.keys() {
            if !self.rules.iter().any(|r| r.name() == name) {
                return Err(LintError::UnknownRule {
                    rule: name.clone(),
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}
