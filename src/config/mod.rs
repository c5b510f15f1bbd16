//! Configuration for make-sbom.
//!
//! - [`AssembleConfig`]: what one run reads and writes, built from the command line
//! - [`ManifestConfig`]: the hand-written YAML manifest describing the artifact
//! - [`Validatable`]: checks run before any work starts

pub mod file;
mod manifest;
mod types;
mod validation;

pub use file::{load_manifest, ConfigFileError};
pub use manifest::{ManifestConfig, ManifestDocument, ManifestPackage, MAIN_PACKAGE_KEY};
pub use types::{AssembleConfig, ScannerConfig, DEFAULT_MANIFEST};
pub use validation::{ConfigError, Validatable};
