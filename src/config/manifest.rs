//! Manifest YAML schema.
//!
//! ```yaml
//! Document:
//!   documentNamespace: https://example.com/sbom/image
//!   creators:
//!     - Organization: Example Inc.
//!     - Tool: make-sbom
//! Package:
//!   mainPackage:
//!     version: 1.0
//!     licenseDeclared: MIT
//!   libfoo:
//!     version: 2.0
//! ```

use crate::error::{Result, SbomError};
use crate::model::{Creator, CreatorType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the package entry describing the artifact itself
pub const MAIN_PACKAGE_KEY: &str = "mainPackage";

static EMPTY_PACKAGE: ManifestPackage = ManifestPackage {
    version: None,
    download_location: None,
    copyright_text: None,
    license_concluded: None,
    license_declared: None,
};

/// Top level of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(rename = "Document")]
    pub document: ManifestDocument,
    /// Package entries in declaration order; an entry may be left empty
    #[serde(rename = "Package", default)]
    pub packages: IndexMap<String, Option<ManifestPackage>>,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    #[serde(default)]
    pub document_namespace: Option<String>,
    /// One single-key map per creator, `{Tool: make-sbom}`
    #[serde(default)]
    pub creators: Vec<IndexMap<String, String>>,
}

/// One package entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestPackage {
    /// Left untyped so `1.0` and `"1.0"` are both accepted
    #[serde(default)]
    pub version: Option<serde_yaml::Value>,
    #[serde(default)]
    pub download_location: Option<String>,
    #[serde(default)]
    pub copyright_text: Option<String>,
    #[serde(default)]
    pub license_concluded: Option<String>,
    #[serde(default)]
    pub license_declared: Option<String>,
}

impl ManifestConfig {
    /// Document namespace URI.
    pub fn namespace(&self) -> Result<&str> {
        self.document
            .document_namespace
            .as_deref()
            .filter(|ns| !ns.trim().is_empty())
            .ok_or_else(|| SbomError::config("Document.documentNamespace is not set"))
    }

    /// Creators in declaration order. An unknown type key is fatal.
    pub fn creators(&self) -> Result<Vec<Creator>> {
        self.document
            .creators
            .iter()
            .flat_map(IndexMap::iter)
            .map(|(key, name)| {
                CreatorType::from_key(key)
                    .map(|creator_type| Creator::new(creator_type, name.as_str()))
                    .ok_or_else(|| SbomError::config(format!("Unknown creator key: {key}")))
            })
            .collect()
    }

    /// The `mainPackage` entry.
    pub fn main_package(&self) -> Result<&ManifestPackage> {
        match self.packages.get(MAIN_PACKAGE_KEY) {
            Some(entry) => Ok(entry.as_ref().unwrap_or(&EMPTY_PACKAGE)),
            None => Err(SbomError::config(format!(
                "Package.{MAIN_PACKAGE_KEY} is not set"
            ))),
        }
    }

    /// Every entry other than `mainPackage`, in declaration order.
    pub fn other_packages(&self) -> impl Iterator<Item = (&str, &ManifestPackage)> {
        self.packages
            .iter()
            .filter(|(key, _)| key.as_str() != MAIN_PACKAGE_KEY)
            .map(|(key, entry)| (key.as_str(), entry.as_ref().unwrap_or(&EMPTY_PACKAGE)))
    }
}

impl ManifestPackage {
    /// Version as text; numbers and booleans are written as YAML shows them.
    pub fn version_text(&self) -> Result<Option<String>> {
        use serde_yaml::Value;
        match &self.version {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
            Some(other) => Err(SbomError::config(format!(
                "version must be a scalar, got {other:?}"
            ))),
        }
    }
}
