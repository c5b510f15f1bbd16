//! Package, file and license-info records.

use super::{validation, LicenseValue, SpdxId, NOASSERTION, NONE};
use std::fmt;

/// Fields of an SPDX element that this crate does not model, kept verbatim
/// so documents passed through unchanged do not lose data.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// Free-text field that may hold one of the SPDX sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextValue {
    Text(String),
    #[default]
    NoAssertion,
    None,
}

impl TextValue {
    /// Read from a document field, recognizing the sentinels.
    #[must_use]
    pub fn from_field(text: &str) -> Self {
        match text {
            NOASSERTION => Self::NoAssertion,
            NONE => Self::None,
            other => Self::Text(other.to_string()),
        }
    }

    /// Use `value` when present and non-empty, NOASSERTION otherwise.
    #[must_use]
    pub fn or_no_assertion(value: Option<&str>) -> Self {
        match value {
            Some(text) if !text.is_empty() => Self::from_field(text),
            _ => Self::NoAssertion,
        }
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
        }
    }
}

/// Where a package can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadLocation {
    Uri(String),
    #[default]
    NoAssertion,
    None,
}

impl DownloadLocation {
    /// Read from a document field without validating it.
    #[must_use]
    pub fn from_field(text: &str) -> Self {
        match text {
            NOASSERTION => Self::NoAssertion,
            NONE => Self::None,
            other => Self::Uri(other.to_string()),
        }
    }

    /// Whether the location matches the SPDX download-location grammar
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Uri(uri) => validation::is_valid_download_location(uri),
            Self::NoAssertion | Self::None => true,
        }
    }
}

impl fmt::Display for DownloadLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => f.write_str(uri),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
        }
    }
}

/// Checksum algorithms named by SPDX 2.2
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Md2,
    Md4,
    Md5,
    Md6,
    Other(String),
}

impl ChecksumAlgorithm {
    /// Parse the SPDX spelling (`SHA256`, `MD5`, ...)
    #[must_use]
    pub fn from_spdx(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "SHA1" => Self::Sha1,
            "SHA224" => Self::Sha224,
            "SHA256" => Self::Sha256,
            "SHA384" => Self::Sha384,
            "SHA512" => Self::Sha512,
            "MD2" => Self::Md2,
            "MD4" => Self::Md4,
            "MD5" => Self::Md5,
            "MD6" => Self::Md6,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => f.write_str("SHA1"),
            Self::Sha224 => f.write_str("SHA224"),
            Self::Sha256 => f.write_str("SHA256"),
            Self::Sha384 => f.write_str("SHA384"),
            Self::Sha512 => f.write_str("SHA512"),
            Self::Md2 => f.write_str("MD2"),
            Self::Md4 => f.write_str("MD4"),
            Self::Md5 => f.write_str("MD5"),
            Self::Md6 => f.write_str("MD6"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A checksum over some content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    /// Lower-case hex digest
    pub value: String,
}

impl Checksum {
    #[must_use]
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }

    /// Scanners emit all-zero digests for entries they could not read.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.value.chars().all(|c| c == '0')
    }
}

/// Hash over all files of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub value: String,
    pub excluded_files: Vec<String>,
}

impl VerificationCode {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            excluded_files: Vec::new(),
        }
    }
}

/// One software component.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: SpdxId,
    pub name: String,
    pub version: Option<String>,
    /// Only meaningful in the document that produced the package
    pub file_name: Option<String>,
    pub download_location: DownloadLocation,
    pub files_analyzed: bool,
    pub verification_code: Option<VerificationCode>,
    pub checksums: Vec<Checksum>,
    pub license_concluded: LicenseValue,
    pub license_declared: LicenseValue,
    /// Present only when license information was gathered per file or per token
    pub license_info_from_files: Option<Vec<LicenseValue>>,
    /// Explains license inference failures
    pub license_comment: Option<String>,
    pub copyright_text: TextValue,
    pub extensions: Extensions,
}

impl Package {
    /// Create a package with every optional field unset and every
    /// assertion field at NOASSERTION.
    pub fn new(id: SpdxId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            version: None,
            file_name: None,
            download_location: DownloadLocation::NoAssertion,
            files_analyzed: false,
            verification_code: None,
            checksums: Vec::new(),
            license_concluded: LicenseValue::NoAssertion,
            license_declared: LicenseValue::NoAssertion,
            license_info_from_files: None,
            license_comment: None,
            copyright_text: TextValue::NoAssertion,
            extensions: Extensions::new(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// One content-addressed file.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub id: SpdxId,
    pub name: String,
    pub checksums: Vec<Checksum>,
    pub license_concluded: LicenseValue,
    pub license_info_in_file: Vec<LicenseValue>,
    pub copyright_text: TextValue,
    pub extensions: Extensions,
}

impl File {
    pub fn new(id: SpdxId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            checksums: Vec::new(),
            license_concluded: LicenseValue::NoAssertion,
            license_info_in_file: vec![LicenseValue::NoAssertion],
            copyright_text: TextValue::NoAssertion,
            extensions: Extensions::new(),
        }
    }

    /// Whether any checksum is an all-zero scanner placeholder
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.checksums.iter().any(Checksum::is_placeholder)
    }
}

/// A license that is not on the SPDX list, referenced as `LicenseRef-*`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLicensingInfo {
    pub license_id: String,
    pub extracted_text: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub cross_refs: Vec<String>,
}
