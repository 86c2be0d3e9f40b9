//! Discovered monorepo modules.

use crate::config::{Configuration, RuleSetting};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A directory identified as a module root through its marker files.
///
/// Modules are produced once per discovery pass and handed to rules by shared
/// reference only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    /// Directory of the module root.
    pub path: PathBuf,
    /// Final path segment of `path`.
    pub name: String,
    /// Configuration resolved for `path`.
    pub config: Configuration,
    /// Truthy entries of `config.rules`.
    pub enabled_rules: BTreeMap<String, RuleSetting>,
}

impl Module {
    /// Creates a module for `path` with its resolved configuration.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, config: Configuration) -> Self {
        let path = path.into();
        let name = module_name(&path);
        let enabled_rules = config.enabled_rules();
        Self {
            path,
            name,
            config,
            enabled_rules,
        }
    }

    /// Checks if a rule is enabled for this module.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.enabled_rules.contains_key(rule)
    }

    /// Returns the setting of an enabled rule.
    #[must_use]
    pub fn rule_setting(&self, rule: &str) -> Option<&RuleSetting> {
        self.enabled_rules.get(rule)
    }
}

fn module_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            path.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}
