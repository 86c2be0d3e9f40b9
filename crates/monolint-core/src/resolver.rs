//! Hierarchical configuration resolution.
//!
//! Every directory may carry a local configuration file. The effective
//! configuration of a directory is the configuration of its parent with the
//! local file (if any) layered on top, starting from a base configuration at
//! the scan root. Siblings never influence each other.

use crate::config::{ConfigError, Configuration};
use std::path::{Component, Path, PathBuf};

/// Local config file names, checked in order. The first one present wins.
pub const LOCAL_CONFIG_NAMES: &[&str] = &[".monolint.json", ".monolint.toml"];

/// Returns the local configuration file of `dir`, if it has one.
#[must_use]
pub fn find_local_config(dir: &Path) -> Option<PathBuf> {
    LOCAL_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Loads the local configuration file of `dir` without layering it.
///
/// Returns the file path together with its content, or `None` when `dir` has
/// no local file.
///
/// # Errors
///
/// Returns an error if the local configuration file cannot be read or parsed.
pub fn load_local(dir: &Path) -> Result<Option<(PathBuf, Configuration)>, ConfigError> {
    let Some(path) = find_local_config(dir) else {
        return Ok(None);
    };

    tracing::debug!("Found local config: {}", path.display());
    let local = Configuration::from_file(&path)?;
    Ok(Some((path, local)))
}

/// Resolves the effective configuration of `dir` given the configuration
/// inherited from its parent.
///
/// # Errors
///
/// Returns an error if the local configuration file cannot be read or parsed.
pub fn resolve(dir: &Path, inherited: &Configuration) -> Result<Configuration, ConfigError> {
    Ok(match load_local(dir)? {
        Some((_, local)) => inherited.overlay(&local),
        None => inherited.clone(),
    })
}

/// Resolves the effective configuration of `dir` by walking every directory
/// from `root` down to `dir`, starting from `base`.
///
/// # Errors
///
/// Returns an error if `dir` is not inside `root`, or if any local
/// configuration file on the way is malformed.
pub fn resolve_path(
    root: &Path,
    dir: &Path,
    base: &Configuration,
) -> Result<Configuration, ConfigError> {
    let relative = dir.strip_prefix(root).map_err(|_| ConfigError::OutsideRoot {
        root: root.to_path_buf(),
        path: dir.to_path_buf(),
    })?;

    let mut current = root.to_path_buf();
    let mut config = resolve(&current, base)?;

    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                current.push(segment);
                config = resolve(&current, &config)?;
            }
            Component::CurDir => {}
            _ => {
                return Err(ConfigError::OutsideRoot {
                    root: root.to_path_buf(),
                    path: dir.to_path_buf(),
                })
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSetting;
    use std::fs;
    use tempfile::TempDir;

    fn base() -> Configuration {
        Configuration::new()
            .with_markers(["package.json"])
            .with_rule("rule-a", RuleSetting::EnabledDefault)
            .with_rule("rule-b", RuleSetting::EnabledDefault)
    }

    #[test]
    fn no_local_config_returns_inherited() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve(tmp.path(), &base()).unwrap();
        assert_eq!(resolved, base());
    }

    #[test]
    fn json_local_config_is_layered() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".monolint.json"),
            r#"{"rules": {"rule-b": false}}"#,
        )
        .unwrap();

        let resolved = resolve(tmp.path(), &base()).unwrap();
        assert!(resolved.is_rule_enabled("rule-a"));
        assert!(!resolved.is_rule_enabled("rule-b"));
        assert_eq!(resolved.markers(), ["package.json"]);
    }

    #[test]
    fn toml_local_config_is_layered() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".monolint.toml"),
            "module-markers = [\"go.mod\"]\n",
        )
        .unwrap();

        let resolved = resolve(tmp.path(), &base()).unwrap();
        assert_eq!(resolved.markers(), ["go.mod"]);
        assert!(resolved.is_rule_enabled("rule-b"));
    }

    #[test]
    fn json_preferred_over_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".monolint.json"), "{}").unwrap();
        fs::write(tmp.path().join(".monolint.toml"), "").unwrap();

        assert_eq!(
            find_local_config(tmp.path()),
            Some(tmp.path().join(".monolint.json"))
        );
    }

    #[test]
    fn load_local_returns_file_unlayered() {
        let tmp = TempDir::new().unwrap();
        assert!(load_local(tmp.path()).unwrap().is_none());

        fs::write(
            tmp.path().join(".monolint.json"),
            r#"{"rules": {"rule-c": true}}"#,
        )
        .unwrap();

        let (path, local) = load_local(tmp.path()).unwrap().unwrap();
        assert_eq!(path, tmp.path().join(".monolint.json"));
        assert!(local.module_markers.is_none());
        assert_eq!(local.rules.len(), 1);
    }

    #[test]
    fn misspelled_key_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".monolint.json"),
            r#"{"module-marker": ["go.mod"]}"#,
        )
        .unwrap();

        let err = resolve(tmp.path(), &base()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { ref message, .. } if message.contains("module-marker")));
    }

    #[test]
    fn malformed_local_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".monolint.json"), "{\"rules\": [").unwrap();

        let err = resolve(tmp.path(), &base()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { .. }));
    }

    #[test]
    fn resolve_path_applies_every_ancestor() {
        let tmp = TempDir::new().unwrap();
        let group = tmp.path().join("group");
        let module = group.join("module");
        fs::create_dir_all(&module).unwrap();
        fs::write(
            tmp.path().join(".monolint.json"),
            r#"{"rules": {"rule-a": false}}"#,
        )
        .unwrap();
        fs::write(group.join(".monolint.json"), r#"{"rules": {"rule-c": true}}"#).unwrap();

        let resolved = resolve_path(tmp.path(), &module, &base()).unwrap();
        assert!(!resolved.is_rule_enabled("rule-a"));
        assert!(resolved.is_rule_enabled("rule-b"));
        assert!(resolved.is_rule_enabled("rule-c"));
    }

    #[test]
    fn sibling_config_does_not_leak() {
        let tmp = TempDir::new().unwrap();
        let left = tmp.path().join("left");
        let right = tmp.path().join("right");
        fs::create_dir_all(&left).unwrap();
        fs::create_dir_all(&right).unwrap();
        fs::write(left.join(".monolint.json"), r#"{"rules": {"rule-a": false}}"#).unwrap();

        let resolved_right = resolve_path(tmp.path(), &right, &base()).unwrap();
        let resolved_root = resolve_path(tmp.path(), tmp.path(), &base()).unwrap();
        assert!(resolved_right.is_rule_enabled("rule-a"));
        assert!(resolved_root.is_rule_enabled("rule-a"));
    }

    #[test]
    fn resolve_path_outside_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();

        let err = resolve_path(tmp.path(), other.path(), &base()).unwrap_err();
        assert!(matches!(err, ConfigError::OutsideRoot { .. }));
    }
}
