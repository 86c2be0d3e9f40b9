//! The ordered catalog of built-in rules.

use crate::{GhWorkflowModulePrefix, PackageJsonSameName, ServerlessSameName};
use monolint_core::RuleBox;

/// Returns all built-in rules in registration order.
///
/// Findings are reported in this order, so new rules go at the end.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(PackageJsonSameName::new()),
        Box::new(ServerlessSameName::new()),
        Box::new(GhWorkflowModulePrefix::new()),
    ]
}

/// Returns the names of all built-in rules in registration order.
#[must_use]
pub fn rule_names() -> Vec<&'static str> {
    all_rules().iter().map(|r| r.name()).collect()
}

/// Looks up a built-in rule by the name used in configuration.
#[must_use]
pub fn find_rule(name: &str) -> Option<RuleBox> {
    all_rules().into_iter().find(|r| r.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        assert_eq!(
            rule_names(),
            [
                "packagejson-same-name",
                "serverless-same-name",
                "gh-workflow-module-prefix"
            ]
        );
    }

    #[test]
    fn test_find_rule() {
        assert!(find_rule("serverless-same-name").is_some());
        assert!(find_rule("no-such-rule").is_none());
    }

    #[test]
    fn test_every_rule_is_documented() {
        for rule in all_rules() {
            assert!(rule.doc_markdown().starts_with("* "), "{}", rule.name());
            assert!(!rule.doc_example_configs().is_empty(), "{}", rule.name());
        }
    }
}
