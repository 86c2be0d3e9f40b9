//! Core types for lint findings and reports.

use crate::module::Module;
use miette::Diagnostic;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A single pass/fail finding produced by a rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    /// Whether the resource complies with the rule.
    pub valid: bool,
    /// Path the finding is about.
    pub resource: PathBuf,
    /// Human-readable explanation.
    pub message: String,
    /// Name of the rule that produced this finding.
    pub rule: String,
    /// Module the finding is attributed to; `None` for tree-wide findings.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_module_summary"
    )]
    pub module: Option<Module>,
}

impl RuleResult {
    /// Creates a passing finding.
    #[must_use]
    pub fn valid(
        rule: impl Into<String>,
        resource: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(true, rule, resource, message)
    }

    /// Creates a failing finding.
    #[must_use]
    pub fn invalid(
        rule: impl Into<String>,
        resource: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(false, rule, resource, message)
    }

    fn new(
        valid: bool,
        rule: impl Into<String>,
        resource: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            valid,
            resource: resource.into(),
            message: message.into(),
            rule: rule.into(),
            module: None,
        }
    }

    /// Attributes this finding to a module.
    #[must_use]
    pub fn with_module(mut self, module: &Module) -> Self {
        self.module = Some(module.clone());
        self
    }

    /// Returns the name of the attributed module, if any.
    #[must_use]
    pub fn module_name(&self) -> Option<&str> {
        self.module.as_ref().map(|m| m.name.as_str())
    }
}

impl std::fmt::Display for RuleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.valid { "ok" } else { "fail" };
        write!(
            f,
            "{}: {} [{}] {}",
            self.resource.display(),
            status,
            self.rule,
            self.message
        )?;
        if let Some(name) = self.module_name() {
            write!(f, " (module: {name})")?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ModuleSummary<'a> {
    name: &'a str,
    path: &'a Path,
}

#[allow(clippy::ref_option)] // signature dictated by serde(serialize_with)
fn serialize_module_summary<S: Serializer>(
    module: &Option<Module>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    module
        .as_ref()
        .map(|m| ModuleSummary {
            name: &m.name,
            path: &m.path,
        })
        .serialize(serializer)
}

/// Renders a failing finding as a miette diagnostic.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&RuleResult> for FindingDiagnostic {
    fn from(r: &RuleResult) -> Self {
        Self {
            message: format!("[{}] {}: {}", r.rule, r.resource.display(), r.message),
            help: r.module_name().map(|name| format!("in module `{name}`")),
        }
    }
}

/// Result of a lint run.
#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    /// All findings, in execution order.
    pub results: Vec<RuleResult>,
    /// Number of modules discovered.
    pub modules_checked: usize,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any finding failed.
    #[must_use]
    pub fn has_invalid(&self) -> bool {
        self.results.iter().any(|r| !r.valid)
    }

    /// Returns the failing findings.
    #[must_use]
    pub fn invalid(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| !r.valid).collect()
    }

    /// Counts findings as `(valid, invalid)`.
    #[must_use]
    pub fn count_by_validity(&self) -> (usize, usize) {
        let valid = self.results.iter().filter(|r| r.valid).count();
        (valid, self.results.len() - valid)
    }

    /// Adds findings from another report.
    pub fn extend(&mut self, other: Self) {
        self.results.extend(other.results);
        self.modules_checked += other.modules_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    fn module() -> Module {
        Module::new("/repo/mod1-js", Configuration::new())
    }

    #[test]
    fn display_includes_module_name() {
        let r = RuleResult::invalid("packagejson-same-name", "/repo/mod1-js/package.json", "bad")
            .with_module(&module());
        let shown = r.to_string();
        assert!(shown.contains("fail [packagejson-same-name] bad"));
        assert!(shown.contains("(module: mod1-js)"));
    }

    #[test]
    fn display_omits_module_when_none() {
        let r = RuleResult::valid("gh-workflow-module-prefix", "/repo/x.yml", "fine");
        assert!(!r.to_string().contains("module:"));
    }

    #[test]
    fn json_contains_module_summary_only() {
        let r = RuleResult::valid("rule", "/repo/mod1-js/package.json", "fine").with_module(&module());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["module"]["name"], "mod1-js");
        assert!(json["module"].get("config").is_none());
    }

    #[test]
    fn json_skips_missing_module() {
        let r = RuleResult::invalid("rule", "/repo/orphan.yml", "no module");
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("module").is_none());
    }

    #[test]
    fn diagnostic_help_names_module() {
        let r = RuleResult::invalid("rule", "/repo/mod1-js/package.json", "bad").with_module(&module());
        let diagnostic = FindingDiagnostic::from(&r);
        assert_eq!(diagnostic.help.as_deref(), Some("in module `mod1-js`"));
        assert!(diagnostic.to_string().starts_with("[rule]"));
    }

    #[test]
    fn report_counts() {
        let mut report = LintReport::new();
        report.results.push(RuleResult::valid("r", "/a", "ok"));
        report.results.push(RuleResult::invalid("r", "/b", "bad"));
        report.modules_checked = 2;

        assert!(report.has_invalid());
        assert_eq!(report.count_by_validity(), (1, 1));
        assert_eq!(report.invalid().len(), 1);

        let mut total = LintReport::new();
        total.extend(report);
        assert_eq!(total.results.len(), 2);
        assert_eq!(total.modules_checked, 2);
    }
}
