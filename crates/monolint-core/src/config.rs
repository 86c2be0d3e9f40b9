//! Configuration types for monolint.
//!
//! A [`Configuration`] can be written as JSON (`.monolint.json`) or TOML
//! (`.monolint.toml`):
//!
//! ```json
//! {
//!   "module-markers": ["package.json", "serverless.yml"],
//!   "rules": {
//!     "packagejson-same-name": true,
//!     "serverless-same-name": false,
//!     "gh-workflow-module-prefix": { "required": true, "suffixes": ["-dev", "-prd"] }
//!   }
//! }
//! ```

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Marker files used when no configuration names any.
pub const DEFAULT_MODULE_MARKERS: &[&str] = &["package.json", "serverless.yml"];

/// Layered configuration for a directory.
///
/// Both fields are optional in a local file. An absent `module-markers` keeps
/// the inherited markers, an absent rule key keeps the inherited setting.
/// Any other top-level key is rejected, so a misspelled field cannot silently
/// fall back to the inherited value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    /// File names whose presence marks a directory as a module root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_markers: Option<Vec<String>>,

    /// Per-rule settings keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module markers.
    #[must_use]
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the setting of a single rule.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, setting: RuleSetting) -> Self {
        self.rules.insert(name.into(), setting);
        self
    }

    /// Loads a configuration file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, ConfigFormat::from_path(path)).map_err(|e| match e {
            ConfigError::Parse { message } => ConfigError::InvalidFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parses a configuration from a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid configuration.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            }),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            }),
        }
    }

    /// Returns the effective module markers (empty when none are set).
    #[must_use]
    pub fn markers(&self) -> &[String] {
        self.module_markers.as_deref().unwrap_or(&[])
    }

    /// Returns the setting for a rule, if any level defined one.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RuleSetting> {
        self.rules.get(name)
    }

    /// Checks if a rule is present and truthy.
    #[must_use]
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        self.rule(name).is_some_and(RuleSetting::is_enabled)
    }

    /// Returns the truthy rule settings.
    #[must_use]
    pub fn enabled_rules(&self) -> BTreeMap<String, RuleSetting> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(name, setting)| (name.clone(), setting.clone()))
            .collect()
    }

    /// Layers `local` on top of `self`.
    ///
    /// Rule entries of `local` replace inherited entries wholesale; rule options
    /// are never merged across levels. `module-markers` is replaced when set.
    #[must_use]
    pub fn overlay(&self, local: &Configuration) -> Configuration {
        let mut merged = self.clone();
        if let Some(markers) = &local.module_markers {
            merged.module_markers = Some(markers.clone());
        }
        for (name, setting) in &local.rules {
            merged.rules.insert(name.clone(), setting.clone());
        }
        merged
    }
}

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Setting of a single rule: `false`, `true`, or an options object.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSetting {
    /// The rule is turned off.
    Disabled,
    /// The rule is on with its default options.
    EnabledDefault,
    /// The rule is on with explicit options layered over its defaults.
    EnabledWithOptions(Map<String, Value>),
}

impl RuleSetting {
    /// Returns `true` unless the rule is disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Expands the setting into a rule's options type.
    ///
    /// `T` should carry `#[serde(default)]` so that fields missing from an
    /// options object fall back to `T::default()` one by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the options object does not fit `T`.
    pub fn expand<T>(&self) -> Result<Option<T>, serde_json::Error>
    where
        T: DeserializeOwned + Default,
    {
        match self {
            Self::Disabled => Ok(None),
            Self::EnabledDefault => Ok(Some(T::default())),
            Self::EnabledWithOptions(options) => {
                serde_json::from_value(Value::Object(options.clone())).map(Some)
            }
        }
    }
}

impl From<bool> for RuleSetting {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::EnabledDefault
        } else {
            Self::Disabled
        }
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(enabled) => Ok(Self::from(enabled)),
            Value::Object(options) => Ok(Self::EnabledWithOptions(options)),
            other => Err(D::Error::custom(format!(
                "rule setting must be a boolean or an object, found `{other}`"
            ))),
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::EnabledDefault => serializer.serialize_bool(true),
            Self::EnabledWithOptions(options) => options.serialize(serializer),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(monolint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config content.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(monolint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Parse error in a config file.
    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(
        code(monolint::config::invalid_file),
        help("fix or remove the file; malformed configuration is never skipped")
    )]
    InvalidFile {
        /// Offending file.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// A directory was resolved against a root it does not belong to.
    #[error("{path} is not inside {root}")]
    #[diagnostic(code(monolint::config::outside_root))]
    OutsideRoot {
        /// Scan root.
        root: PathBuf,
        /// Requested directory.
        path: PathBuf,
    },
}
