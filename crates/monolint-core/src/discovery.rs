//! Module discovery.
//!
//! The tree is walked depth-first in pre-order, siblings sorted by file name,
//! so the returned modules are always in lexicographic path order. Callers may
//! rely on this order.

use crate::config::{ConfigError, Configuration};
use crate::module::Module;
use crate::resolver;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Folder names that are never descended into nor treated as modules.
///
/// This is a fixed policy and cannot be changed through configuration.
pub const IGNORED_FOLDERS: &[&str] = &["node_modules", ".git", "vendor", "target"];

/// Errors that can occur during discovery.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum DiscoveryError {
    /// The scan root is not a directory.
    #[error("Not a directory: {0}")]
    #[diagnostic(code(monolint::discovery::not_a_directory))]
    NotADirectory(PathBuf),

    /// Error while walking the tree.
    #[error("Failed to walk directory tree: {0}")]
    #[diagnostic(code(monolint::discovery::walk))]
    Walk(#[from] walkdir::Error),

    /// A local configuration file could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a discovery walk found.
#[derive(Debug, Default)]
pub struct Scan {
    /// Module roots in discovery order.
    pub modules: Vec<Module>,
    /// Every local configuration file loaded during the walk, unlayered, in
    /// walk order. Includes files in directories with no module below them.
    pub local_configs: Vec<(PathBuf, Configuration)>,
}

/// Discovers all modules below `base_dir`.
///
/// `config` is the top-level configuration; local configuration files found
/// along the way are layered on top of it for each directory.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a local configuration
/// file is malformed.
pub fn discover(base_dir: &Path, config: &Configuration) -> Result<Vec<Module>, DiscoveryError> {
    Ok(scan(base_dir, config)?.modules)
}

/// Walks `base_dir` like [`discover`], also returning the local
/// configuration files that were read.
///
/// # Errors
///
/// Same as [`discover`].
pub fn scan(base_dir: &Path, config: &Configuration) -> Result<Scan, DiscoveryError> {
    if !base_dir.is_dir() {
        return Err(DiscoveryError::NotADirectory(base_dir.to_path_buf()));
    }

    debug!("Discovering modules under {}", base_dir.display());

    // Resolved configuration of each directory on the current path, by depth.
    let mut stack: Vec<Configuration> = Vec::new();
    let mut found = Scan::default();

    let walker = WalkDir::new(base_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        stack.truncate(entry.depth());
        let inherited = stack.last().unwrap_or(config);
        let effective = match resolver::load_local(entry.path())? {
            Some((path, local)) => {
                let effective = inherited.overlay(&local);
                found.local_configs.push((path, local));
                effective
            }
            None => inherited.clone(),
        };

        if is_module_root(entry.path(), effective.markers()) {
            let module = Module::new(entry.path(), effective.clone());
            debug!("Found module {} at {}", module.name, module.path.display());
            found.modules.push(module);
        }

        stack.push(effective);
    }

    info!("Discovered {} module(s)", found.modules.len());
    Ok(found)
}

/// Checks whether `dir` directly contains any of the marker files.
#[must_use]
pub fn is_module_root(dir: &Path, markers: &[String]) -> bool {
    markers.iter().any(|marker| dir.join(marker).is_file())
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_FOLDERS.contains(&name))
}
