//! Entry points running the built-in rules with the built-in defaults.

use monolint_core::{
    discover, Configuration, DiscoveryError, LintError, LintReport, Linter, Module, RuleResult,
    RuleSetting, DEFAULT_MODULE_MARKERS,
};
use monolint_rules::{all_rules, rule_names};
use std::path::Path;

/// Returns the built-in base configuration.
///
/// Markers are `package.json` and `serverless.yml`; every built-in rule is
/// enabled with its default options.
#[must_use]
pub fn default_config() -> Configuration {
    rule_names().into_iter().fold(
        Configuration::new().with_markers(DEFAULT_MODULE_MARKERS.iter().copied()),
        |config, name| config.with_rule(name, RuleSetting::EnabledDefault),
    )
}

/// Discovers the modules of `base_dir` using `config` as the top-level configuration.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a local configuration
/// file is malformed.
pub fn discover_modules(base_dir: &Path, config: &Configuration) -> Result<Vec<Module>, DiscoveryError> {
    discover(base_dir, config)
}

/// Lints `base_dir` with every built-in rule and the built-in defaults.
///
/// Local configuration files in the tree, including one at `base_dir`, are
/// layered on top of [`default_config`].
///
/// Findings come in two phases. First the set-wide findings of each rule in
/// registry order, which today means `gh-workflow-module-prefix` only. Then,
/// module by module in discovery order, the per-module findings of each
/// enabled rule in registry order. Workflow findings therefore precede
/// `package.json` findings even though `packagejson-same-name` is registered
/// first.
///
/// # Errors
///
/// See [`Linter::lint`].
pub fn lint(base_dir: &Path) -> Result<Vec<RuleResult>, LintError> {
    Ok(lint_with_config(base_dir, default_config(), false)?.results)
}

/// Lints `base_dir` with every built-in rule and an explicit top-level configuration.
///
/// Findings are ordered as described on [`lint`].
///
/// # Errors
///
/// See [`Linter::lint`].
pub fn lint_with_config(
    base_dir: &Path,
    config: Configuration,
    verbose: bool,
) -> Result<LintReport, LintError> {
    Linter::builder()
        .root(base_dir)
        .config(config)
        .rules(all_rules())
        .verbose(verbose)
        .build()?
        .lint()
}
