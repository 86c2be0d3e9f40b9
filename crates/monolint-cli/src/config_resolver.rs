//! Top-level configuration for a `check` run.
//!
//! The built-in defaults are the bottom layer. On top of them goes at most one
//! file: the `--config` argument if given, otherwise
//! `$MONOLINT_CONFIG_DIR/config.json` or `~/.monolint/config.json` when it
//! exists. Local `.monolint.json` files in the scanned tree, the root one
//! included, are layered later by the linter itself.

use anyhow::{Context, Result};
use monolint::{default_config, Configuration};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const GLOBAL_CONFIG_NAME: &str = "config.json";

/// Builds the top-level configuration.
///
/// # Errors
///
/// Fails if an explicit file is missing, or if the chosen file is malformed.
pub fn load(explicit: Option<&Path>) -> Result<Configuration> {
    load_with(explicit, global_config_dir().as_deref())
}

fn load_with(explicit: Option<&Path>, global_dir: Option<&Path>) -> Result<Configuration> {
    let defaults = default_config();

    let file = match (explicit, global_dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) if dir.join(GLOBAL_CONFIG_NAME).is_file() => {
            let path = dir.join(GLOBAL_CONFIG_NAME);
            info!("Using global config: {}", path.display());
            path
        }
        _ => {
            debug!("No top-level config file, using built-in defaults");
            return Ok(defaults);
        }
    };

    let layer = Configuration::from_file(&file)
        .with_context(|| format!("Failed to load config: {}", file.display()))?;
    Ok(defaults.overlay(&layer))
}

/// `$MONOLINT_CONFIG_DIR`, else `~/.monolint`.
fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("MONOLINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".monolint")))
}
