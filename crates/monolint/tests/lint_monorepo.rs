//! Integration test: discovery, configuration layering and linting end-to-end.
//!
//! The fixture monorepo is materialized in a temporary directory:
//!
//! ```text
//! .monolint.json              both same-name rules on
//! group1/.monolint.json       both same-name rules off
//! group1/mod3-svc/            _thisisamodule, serverless.yml (wrong service)
//! mod1-js/                    package.json (wrong name), node_modules/left-pad
//! mod2-svc/                   serverless.yml (wrong service)
//! mod4-svc/                   package.json + serverless.yml (both right)
//! mod4-svc/mod5-lib/          package.json (right)
//! node_modules/               markers that must never be discovered
//! platform/.monolint.json     packagejson-same-name off
//! platform/mod6-svc/          serverless.yml (right)
//! platform/mod7-js/           package.json (wrong name, rule off)
//! ```

use monolint::{
    default_config, discover_modules, lint, lint_with_config, Configuration, LintError, Module,
    RuleSetting,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        ".monolint.json",
        r#"{"rules": {"packagejson-same-name": true, "serverless-same-name": true}}"#,
    );

    write(
        root,
        "group1/.monolint.json",
        r#"{"rules": {"packagejson-same-name": false, "serverless-same-name": false}}"#,
    );
    write(root, "group1/mod3-svc/_thisisamodule", "");
    write(root, "group1/mod3-svc/serverless.yml", "service: mod3-service\n");

    write(root, "mod1-js/package.json", r#"{"name": "mod1-javascript"}"#);
    write(root, "mod1-js/node_modules/left-pad/package.json", r#"{"name": "left-pad"}"#);

    write(root, "mod2-svc/serverless.yml", "service: mod2-service\n");

    write(root, "mod4-svc/package.json", r#"{"name": "mod4-svc"}"#);
    write(root, "mod4-svc/serverless.yml", "service: mod4-svc\n");
    write(root, "mod4-svc/mod5-lib/package.json", r#"{"name": "mod5-lib"}"#);

    write(root, "node_modules/some-lib/package.json", r#"{"name": "some-lib"}"#);
    write(root, "node_modules/some-svc/serverless.yml", "service: some-svc\n");
    write(root, "node_modules/marked/_thisisamodule", "");

    write(
        root,
        "platform/.monolint.json",
        r#"{"rules": {"packagejson-same-name": false}}"#,
    );
    write(root, "platform/mod6-svc/serverless.yml", "service: mod6-svc\n");
    write(root, "platform/mod7-js/package.json", r#"{"name": "wrong"}"#);

    tmp
}

fn markers(markers: &[&str]) -> Configuration {
    Configuration::new().with_markers(markers.iter().copied())
}

fn names(modules: &[Module]) -> Vec<&str> {
    modules.iter().map(|m| m.name.as_str()).collect()
}

fn file_of(path: &Path) -> &str {
    path.file_name().unwrap().to_str().unwrap()
}

// ── Discovery ──

#[test]
fn discover_modules_by_marker() {
    let tmp = fixture();

    let modules = discover_modules(tmp.path(), &markers(&["_thisisamodule"])).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "mod3-svc");
    assert!(modules[0].path.to_string_lossy().contains("group1"));

    let modules = discover_modules(tmp.path(), &markers(&[])).unwrap();
    assert!(modules.is_empty());
}

#[test]
fn discover_modules_deduplicates_and_ignores_folders() {
    let tmp = fixture();

    let modules =
        discover_modules(tmp.path(), &markers(&["package.json", "serverless.yml"])).unwrap();
    assert_eq!(
        names(&modules),
        ["mod3-svc", "mod1-js", "mod2-svc", "mod4-svc", "mod5-lib", "mod6-svc", "mod7-js"]
    );
    assert!(modules
        .iter()
        .all(|m| !m.path.to_string_lossy().contains("node_modules")));
}

#[test]
fn discover_modules_resolves_config_hierarchy() {
    let tmp = fixture();
    let config = markers(&["package.json", "serverless.yml"])
        .with_rule("serverless-same-name", RuleSetting::EnabledDefault)
        .with_rule("packagejson-same-name", RuleSetting::EnabledDefault);

    let modules = discover_modules(tmp.path(), &config).unwrap();
    assert_eq!(modules.len(), 7);

    let mod3 = &modules[0];
    assert_eq!(mod3.name, "mod3-svc");
    assert!(!mod3.config.is_rule_enabled("serverless-same-name"));
    assert!(!mod3.config.is_rule_enabled("packagejson-same-name"));

    let mod6 = &modules[5];
    assert_eq!(mod6.name, "mod6-svc");
    assert!(mod6.config.is_rule_enabled("serverless-same-name"));
    assert!(!mod6.config.is_rule_enabled("packagejson-same-name"));
    assert!(mod6.enabled_rules.contains_key("serverless-same-name"));
    assert!(!mod6.enabled_rules.contains_key("packagejson-same-name"));
}

#[test]
fn local_config_change_only_affects_its_subtree() {
    let tmp = fixture();
    let config = default_config();
    let before = discover_modules(tmp.path(), &config).unwrap();

    write(
        tmp.path(),
        "mod4-svc/.monolint.json",
        r#"{"rules": {"serverless-same-name": false}}"#,
    );
    let after = discover_modules(tmp.path(), &config).unwrap();

    for (b, a) in before.iter().zip(&after) {
        let inside = a.path.starts_with(tmp.path().join("mod4-svc"));
        assert_eq!(b.config == a.config, !inside, "{}", a.name);
    }
}

// ── Lint ──

#[test]
fn lint_test_repo() {
    let tmp = fixture();
    let results = lint(tmp.path()).unwrap();

    assert!(results.len() > 5);

    assert_eq!(file_of(&results[0].resource), "package.json");
    assert_eq!(results[0].module_name(), Some("mod1-js"));
    assert!(!results[0].valid);

    assert_eq!(file_of(&results[1].resource), "serverless.yml");
    assert_eq!(results[1].module_name(), Some("mod2-svc"));
    assert!(!results[1].valid);

    assert_eq!(file_of(&results[2].resource), "package.json");
    assert_eq!(results[2].module_name(), Some("mod4-svc"));
    assert!(results[2].valid);
}

#[test]
fn lint_skips_disabled_modules() {
    let tmp = fixture();
    let results = lint(tmp.path()).unwrap();

    let attributed: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.module_name().unwrap(), r.rule.as_str()))
        .collect();
    assert_eq!(
        attributed,
        [
            ("mod1-js", "packagejson-same-name"),
            ("mod2-svc", "serverless-same-name"),
            ("mod4-svc", "packagejson-same-name"),
            ("mod4-svc", "serverless-same-name"),
            ("mod5-lib", "packagejson-same-name"),
            ("mod6-svc", "serverless-same-name"),
        ]
    );
}

#[test]
fn lint_reports_workflow_findings_first() {
    let tmp = fixture();
    write(tmp.path(), ".github/workflows/mod1-js.yml", "on: push\n");
    write(tmp.path(), ".github/workflows/release.yml", "on: push\n");

    let results = lint(tmp.path()).unwrap();

    assert_eq!(results[0].rule, "gh-workflow-module-prefix");
    assert!(results[0].valid);
    assert_eq!(results[0].module_name(), Some("mod1-js"));

    assert_eq!(results[1].rule, "gh-workflow-module-prefix");
    assert!(!results[1].valid);
    assert!(results[1].module.is_none());

    assert_eq!(results[2].module_name(), Some("mod1-js"));
    assert_eq!(results[2].rule, "packagejson-same-name");
}

#[test]
fn lint_requires_workflow_files() {
    let tmp = fixture();
    write(
        tmp.path(),
        "platform/mod6-svc/.monolint.json",
        r#"{"rules": {"gh-workflow-module-prefix": {"required": true, "suffixes": ["-dev"]}}}"#,
    );
    write(tmp.path(), ".github/workflows/mod6-svc-deploy-dev.yml", "on: push\n");

    let report = lint_with_config(tmp.path(), default_config(), true).unwrap();
    let required: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.message == "Required gh workflow file found")
        .collect();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].module_name(), Some("mod6-svc"));
    assert_eq!(report.modules_checked, 7);
}

#[test]
fn lint_rejects_unknown_rules() {
    let tmp = fixture();
    write(
        tmp.path(),
        "platform/mod7-js/.monolint.json",
        r#"{"rules": {"no-such-rule": true}}"#,
    );

    let err = lint(tmp.path()).unwrap_err();
    assert!(matches!(err, LintError::UnknownRule { ref rule, .. } if rule == "no-such-rule"));
}

#[test]
fn lint_rejects_unknown_rules_outside_modules() {
    let tmp = fixture();
    write(
        tmp.path(),
        "docs/.monolint.json",
        r#"{"rules": {"no-such-rule": true}}"#,
    );

    let err = lint(tmp.path()).unwrap_err();
    match err {
        LintError::UnknownRule { rule, path } => {
            assert_eq!(rule, "no-such-rule");
            assert_eq!(path, tmp.path().join("docs/.monolint.json"));
        }
        other => panic!("expected UnknownRule, got {other:?}"),
    }
}

#[test]
fn lint_rejects_misspelled_config_keys() {
    let tmp = fixture();
    write(tmp.path(), "platform/.monolint.json", r#"{"module-marker": ["x"]}"#);

    let err = lint(tmp.path()).unwrap_err();
    assert!(matches!(err, LintError::Discovery(_)));
    assert!(err.to_string().contains("module-marker"));
}

#[test]
fn lint_treats_opted_out_module_workflows_as_orphans() {
    let tmp = fixture();
    write(
        tmp.path(),
        "mod2-svc/.monolint.json",
        r#"{"rules": {"gh-workflow-module-prefix": false}}"#,
    );
    write(tmp.path(), ".github/workflows/mod2-svc-deploy.yml", "on: push\n");

    let results = lint(tmp.path()).unwrap();
    assert_eq!(results[0].rule, "gh-workflow-module-prefix");
    assert!(!results[0].valid);
    assert!(results[0].module.is_none());
    assert!(results[0].message.contains("with this rule enabled"));
}

#[test]
fn lint_surfaces_malformed_config() {
    let tmp = fixture();
    write(tmp.path(), "mod2-svc/.monolint.json", "{\"rules\": ");

    let err = lint(tmp.path()).unwrap_err();
    assert!(matches!(err, LintError::Discovery(_)));
}

#[test]
fn lint_reads_toml_config() {
    let tmp = fixture();
    write(
        tmp.path(),
        "mod1-js/.monolint.toml",
        "[rules]\npackagejson-same-name = false\n",
    );

    let results = lint(tmp.path()).unwrap();
    assert!(results.iter().all(|r| r.module_name() != Some("mod1-js")));
}
