//! Configuration validation for make-sbom.
//!
//! Provides the validation trait and its implementations for run configuration.

use super::types::{AssembleConfig, ScannerConfig};
use crate::error::SbomError;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for SbomError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with the first error found.
    fn ensure_valid(&self) -> Result<(), SbomError> {
        match self.validate().into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AssembleConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref input) = self.input {
            if !is_bare_file_name(input) {
                errors.push(ConfigError {
                    field: "input".to_string(),
                    message: format!(
                        "'{}' must be a file in the current directory",
                        input.display()
                    ),
                });
            } else if !input.is_file() {
                errors.push(ConfigError {
                    field: "input".to_string(),
                    message: format!("'{}' does not exist", input.display()),
                });
            }

            if !self.manifest.is_file() {
                errors.push(ConfigError {
                    field: "config".to_string(),
                    message: format!(
                        "config file '{}' does not exist",
                        self.manifest.display()
                    ),
                });
            }
        } else if self.source_count() == 0 {
            errors.push(ConfigError {
                field: "input".to_string(),
                message: "nothing to do: give an artifact, a scan target or an external SBOM"
                    .to_string(),
            });
        }

        if let Some(ref package_list) = self.package_list {
            if !package_list.is_file() {
                errors.push(ConfigError {
                    field: "package".to_string(),
                    message: format!("package list '{}' does not exist", package_list.display()),
                });
            }
        }

        for (i, sbom) in self.external_sboms.iter().enumerate() {
            if !sbom.is_file() {
                errors.push(ConfigError {
                    field: format!("external_sbom[{i}]"),
                    message: format!("'{}' does not exist", sbom.display()),
                });
            }
        }

        if let Some(ref output) = self.output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError {
                        field: "output".to_string(),
                        message: format!("Parent directory does not exist: {}", parent.display()),
                    });
                }
            }
        }

        if !self.scan_targets.is_empty() {
            errors.extend(self.scanner.validate());
        }

        errors
    }
}

impl Validatable for ScannerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.program.trim().is_empty() {
            errors.push(ConfigError {
                field: "scanner".to_string(),
                message: "Scanner program must not be empty".to_string(),
            });
        }
        errors
    }
}

/// A path with no directory component, not even `./`.
fn is_bare_file_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == path.as_os_str())
}
