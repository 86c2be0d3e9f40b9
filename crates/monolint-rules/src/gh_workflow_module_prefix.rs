//! Rule tying GitHub workflow file names to module names.
//!
//! # Configuration
//!
//! - `required`: Require one workflow file per module and suffix (default: false)
//! - `suffixes`: Allowed name suffixes before `.yml` (default: `[""]`, any suffix)
//!
//! The tree-wide name check follows the setting resolved for the scan root.
//! The required-file check follows each module's own setting.
//!
//! Only modules with this rule enabled count as prefixes. A module that turns
//! the rule off locally is invisible here, so its workflow files are reported
//! like files of no module at all.

use monolint_core::{
    expand_options, LintContext, Module, Rule, RuleError, RuleExample, RuleOutcome, RuleResult,
    RuleSetting,
};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rule name for gh-workflow-module-prefix.
pub const NAME: &str = "gh-workflow-module-prefix";

/// Options of [`GhWorkflowModulePrefix`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GhWorkflowModulePrefixConfig {
    /// Whether every module must have a workflow file for each suffix.
    pub required: bool,
    /// Allowed suffixes between the module name and `.yml`.
    pub suffixes: Vec<String>,
}

impl Default for GhWorkflowModulePrefixConfig {
    fn default() -> Self {
        Self {
            required: false,
            suffixes: vec![String::new()],
        }
    }
}

/// Checks workflow files in `.github/workflows` against module names.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhWorkflowModulePrefix;

impl GhWorkflowModulePrefix {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the workflows directory of a scan root.
#[must_use]
pub fn workflows_dir(base_dir: &Path) -> PathBuf {
    base_dir.join(".github").join("workflows")
}

/// Lists `.yml` file names in `dir`, sorted. A missing directory has none.
fn list_workflow_files(dir: &Path) -> Result<Vec<String>, RuleError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let io_err = |e| RuleError::Io {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".yml") {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

fn check_existing_names(
    dir: &Path,
    options: &GhWorkflowModulePrefixConfig,
    files: &[String],
    modules: &[&Module],
) -> Vec<RuleResult> {
    let mut results = Vec::new();

    for file in files {
        let resource = dir.join(file);

        // Longest matching name, so `api-admin-dev.yml` belongs to `api-admin`, not `api`.
        let Some(module) = modules
            .iter()
            .filter(|m| file.starts_with(m.name.as_str()))
            .max_by_key(|m| m.name.len())
        else {
            results.push(RuleResult::invalid(
                NAME,
                resource,
                "File should have the name of a module with this rule enabled as prefix",
            ));
            continue;
        };

        let stem = file.strip_suffix(".yml").unwrap_or(file);
        let suffix_ok = options
            .suffixes
            .iter()
            .any(|s| s.is_empty() || stem.ends_with(s.as_str()));

        let result = if suffix_ok {
            RuleResult::valid(NAME, resource, "Workflow file name is correct")
        } else {
            RuleResult::invalid(
                NAME,
                resource,
                format!(
                    "File name suffix should be one of {}",
                    format_suffixes(&options.suffixes)
                ),
            )
        };
        results.push(result.with_module(module));
    }

    results
}

fn check_required_files(
    dir: &Path,
    module: &Module,
    options: &GhWorkflowModulePrefixConfig,
    files: &[String],
) -> Result<Vec<RuleResult>, RuleError> {
    let mut results = Vec::new();

    for suffix in &options.suffixes {
        let pattern = format!(
            "^{}.*{}\\.yml$",
            regex::escape(&module.name),
            regex::escape(suffix)
        );
        let re = Regex::new(&pattern).map_err(|e| RuleError::InvalidOptions {
            rule: NAME.to_string(),
            message: e.to_string(),
        })?;

        let result = match files.iter().find(|f| re.is_match(f)) {
            Some(found) => RuleResult::valid(NAME, dir.join(found), "Required gh workflow file found"),
            None => RuleResult::invalid(
                NAME,
                dir.join(format!("{}{suffix}.yml", module.name)),
                "Missing required gh workflow file",
            ),
        };
        results.push(result.with_module(module));
    }

    Ok(results)
}

fn format_suffixes(suffixes: &[String]) -> String {
    suffixes
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Rule for GhWorkflowModulePrefix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check_modules(&self, modules: &[&Module], ctx: &LintContext<'_>) -> RuleOutcome {
        let dir = workflows_dir(ctx.base_dir);
        let files = list_workflow_files(&dir)?;
        if ctx.verbose {
            info!("Found {} workflow file(s) in {}", files.len(), dir.display());
        }

        let mut results = Vec::new();

        let tree_options = match ctx.base_config.rule(NAME) {
            Some(setting) => expand_options::<GhWorkflowModulePrefixConfig>(NAME, setting)?,
            None => None,
        };
        if let Some(options) = tree_options {
            results.extend(check_existing_names(&dir, &options, &files, modules));
        }

        for module in modules {
            let Some(setting) = module.rule_setting(NAME) else {
                continue;
            };
            let Some(options) = expand_options::<GhWorkflowModulePrefixConfig>(NAME, setting)? else {
                continue;
            };
            if !options.required {
                continue;
            }

            debug!("Checking required workflow files for {}", module.name);
            results.extend(check_required_files(&dir, module, &options, &files)?);
        }

        Ok(Some(results))
    }

    fn doc_markdown(&self) -> &'static str {
        "* Checks if workflow file name starts with a known module name. Additionally it can check for specific suffixes in the name, and, if required, if a set of suffixed file names exists for each module"
    }

    fn doc_example_configs(&self) -> Vec<RuleExample> {
        let suffixes = serde_json::json!(["-dev", "-prd"]);
        let mut suffix_only = serde_json::Map::new();
        suffix_only.insert("suffixes".into(), suffixes.clone());
        let mut required = suffix_only.clone();
        required.insert("required".into(), serde_json::Value::Bool(true));

        vec![
            RuleExample::new(
                "Activates this rule. It will just check if workflow name prefix starts with an existing module name",
                RuleSetting::EnabledDefault,
            ),
            RuleExample::new("Deactivates this rule", RuleSetting::Disabled),
            RuleExample::new(
                "Checks if workflow file name starts with a known module name and ends with one of \"-dev\" or \"-prd\"",
                RuleSetting::EnabledWithOptions(suffix_only),
            ),
            RuleExample::new(
                "Checks, for each existing module, if there exists a workflow file which name ends with \"-dev\" and another with \"-prd\". If we have modules \"mod1\" and \"mod2\", files \"mod1-dev.yml, mod1-prd.yml, mod2-dev.yml, mod2-prd.yml\" are required",
                RuleSetting::EnabledWithOptions(required),
            ),
        ]
    }
}
