//! Manifest file loading.

use super::manifest::ManifestConfig;
use crate::error::SbomError;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "config file '{}' does not exist", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for SbomError {
    fn from(err: ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Load a manifest from a YAML file.
pub fn load_manifest(path: &Path) -> Result<ManifestConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let manifest: ManifestConfig = serde_yaml::from_str(&content)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_manifest() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "Document:\n  documentNamespace: https://example.com/x\n  creators:\n    - Tool: make-sbom\nPackage:\n  mainPackage:\n    version: '1.0'"
        )
        .expect("write");

        let manifest = load_manifest(file.path()).expect("loads");
        assert!(manifest.main_package().is_ok());
    }

    #[test]
    fn test_missing_manifest() {
        let err = load_manifest(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::NotFound(_)));
        let err: SbomError = err.into();
        assert!(err.is_config());
    }

    #[test]
    fn test_malformed_manifest() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "Document: [unterminated").expect("write");

        let err = load_manifest(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse(_)));
    }
}
