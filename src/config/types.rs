//! Run configuration for make-sbom.

use crate::scanner::DEFAULT_SCANNER;
use std::path::PathBuf;

/// Default manifest file name, looked up in the current directory
pub const DEFAULT_MANIFEST: &str = "config.yaml";

// ============================================================================
// Assemble Configuration
// ============================================================================

/// Everything one run needs to know, collected from the command line.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Artifact the SBOM describes; must be a file in the current directory.
    /// Without it no manifest is read and sources are passed through.
    pub input: Option<PathBuf>,
    /// Manifest YAML
    pub manifest: PathBuf,
    /// Pre-existing SBOM documents to embed
    pub external_sboms: Vec<PathBuf>,
    /// Output file; `.spdx.json` is appended when missing
    pub output: Option<PathBuf>,
    /// Package-manager listing to import
    pub package_list: Option<PathBuf>,
    /// Paths handed to the content scanner
    pub scan_targets: Vec<PathBuf>,
    /// Content scanner settings
    pub scanner: ScannerConfig,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            input: None,
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            external_sboms: Vec::new(),
            output: None,
            package_list: None,
            scan_targets: Vec::new(),
            scanner: ScannerConfig::default(),
        }
    }
}

impl AssembleConfig {
    /// Number of sources besides the manifest
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.external_sboms.len()
            + self.scan_targets.len()
            + usize::from(self.package_list.is_some())
    }
}

/// Content scanner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Program to run
    pub program: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SCANNER.to_string(),
        }
    }
}
