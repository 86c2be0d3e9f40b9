//! Rule requiring `package.json` to be named after its module.
//!
//! # Rationale
//!
//! When the package name drifts from the folder name, tooling that maps
//! packages to paths (workspaces, deploy scripts, CODEOWNERS) silently breaks.

use monolint_core::{
    Configuration, Module, Rule, RuleError, RuleExample, RuleOutcome, RuleResult, RuleSetting,
};
use serde_json::Value;

/// Rule name for packagejson-same-name.
pub const NAME: &str = "packagejson-same-name";

/// Manifest file inspected by this rule.
pub const MANIFEST: &str = "package.json";

/// Checks that the `name` in a module's `package.json` equals the module name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonSameName;

impl PackageJsonSameName {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PackageJsonSameName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check(&self, module: &Module, _base_config: &Configuration) -> RuleOutcome {
        let manifest = module.path.join(MANIFEST);
        if !manifest.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&manifest).map_err(|e| RuleError::Io {
            path: manifest.clone(),
            source: e,
        })?;

        let result = match serde_json::from_str::<Value>(&content) {
            Ok(json) => match json.get("name").and_then(Value::as_str) {
                Some(name) if name == module.name => {
                    RuleResult::valid(NAME, &manifest, "package.json name equals module name")
                }
                Some(name) => RuleResult::invalid(
                    NAME,
                    &manifest,
                    format!(
                        "package.json name \"{name}\" should be \"{}\"",
                        module.name
                    ),
                ),
                None => RuleResult::invalid(
                    NAME,
                    &manifest,
                    format!(
                        "package.json should have attribute \"name\" set to \"{}\"",
                        module.name
                    ),
                ),
            },
            Err(e) => RuleResult::invalid(NAME, &manifest, format!("package.json is not valid JSON: {e}")),
        };

        Ok(Some(vec![result.with_module(module)]))
    }

    fn doc_markdown(&self) -> &'static str {
        "* Checks if the attribute \"name\" in package.json equals the name of the module folder"
    }

    fn doc_example_configs(&self) -> Vec<RuleExample> {
        vec![
            RuleExample::new("Enables this rule", RuleSetting::EnabledDefault),
            RuleExample::new("Disables this rule", RuleSetting::Disabled),
        ]
    }
}
