//! Init command implementation.

use anyhow::{bail, Result};
use monolint::default_config;
use std::path::Path;

const CONFIG_FILE: &str = ".monolint.json";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, starter_config()?)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure module markers and rules");
    println!("  2. Add {CONFIG_FILE} files in subfolders to override rules there");
    println!("  3. Run: monolint check");

    Ok(())
}

fn starter_config() -> Result<String> {
    let mut json = serde_json::to_string_pretty(&default_config())?;
    json.push('\n');
    Ok(json)
}
