//! Context types for rule execution.

use crate::config::Configuration;
use std::path::Path;

/// Context provided to rules that check the whole module set.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    /// Root directory of the scan.
    pub base_dir: &'a Path,
    /// Whether the caller asked for verbose output.
    pub verbose: bool,
    /// Configuration resolved for the scan root.
    pub base_config: &'a Configuration,
}

impl<'a> LintContext<'a> {
    /// Creates a new lint context.
    #[must_use]
    pub fn new(base_dir: &'a Path, base_config: &'a Configuration) -> Self {
        Self {
            base_dir,
            verbose: false,
            base_config,
        }
    }

    /// Sets the verbose flag.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
