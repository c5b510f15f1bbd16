//! Package-list adapter.
//!
//! Reads the package listings written while building a root file system:
//!
//! - `apk list --installed` output (Alpine):
//!   `abos-base-2.0-r1 aarch64 {abos-base} (MIT) [installed]`
//! - `dpkg-licenses -c` CSV output (Debian), recognized by its header:
//!   `"St","Name","Version","Arch","Description","Licenses"`
//!
//! Lines that cannot be read are skipped with a warning.

use super::{SbomSource, SourceContribution, StandaloneDocument};
use crate::error::{Result, SbomError};
use crate::license::{debian_license_rename, LicenseTokens};
use crate::model::{Package, SpdxId};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static APK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ ]*)-(\d.*?-r\d+) [^(]*\(([^)]*)\)").expect("static regex")
});

/// First column of the `dpkg-licenses -c` header
const DPKG_HEADER_PREFIX: &str = "\"St\",";

/// Architecture qualifiers `dpkg-licenses` appends to package names
const DPKG_ARCH_SUFFIXES: &[&str] = &[":armhf", ":arm64"];

/// Format of a package listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageListDialect {
    /// `apk list --installed`
    Apk,
    /// `dpkg-licenses -c`
    Dpkg,
}

impl PackageListDialect {
    /// Pick the dialect from the first line of the listing.
    #[must_use]
    pub fn detect(first_line: &str) -> Self {
        if first_line.starts_with(DPKG_HEADER_PREFIX) {
            Self::Dpkg
        } else {
            Self::Apk
        }
    }
}

/// One package read from a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub licenses: LicenseTokens,
}

impl PackageRecord {
    /// Build the SPDX package for this record.
    #[must_use]
    pub fn to_package(&self) -> Package {
        let mut package = Package::new(SpdxId::unique(&self.name), self.name.as_str());
        if !self.version.is_empty() {
            package.version = Some(self.version.clone());
        }
        self.licenses.resolve(&self.name).apply_to(&mut package);
        package
    }
}

/// Read every package from a listing. Empty input yields no packages.
#[must_use]
pub fn parse_package_list(content: &str) -> Vec<PackageRecord> {
    let Some(first_line) = content.lines().next() else {
        return Vec::new();
    };
    match PackageListDialect::detect(first_line) {
        PackageListDialect::Apk => parse_apk(content),
        PackageListDialect::Dpkg => parse_dpkg(content),
    }
}

fn parse_apk(content: &str) -> Vec<PackageRecord> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let Some(caps) = APK_LINE.captures(line) else {
                tracing::warn!("Could not parse line: {}", line);
                return None;
            };
            Some(PackageRecord {
                name: caps[1].to_string(),
                version: caps[2].to_string(),
                licenses: LicenseTokens::Single(caps[3].to_string()),
            })
        })
        .collect()
}

fn parse_dpkg(content: &str) -> Vec<PackageRecord> {
    let mut lines = content.lines();
    let header = lines.next().map(split_csv_line).unwrap_or_default();
    let column = |name: &str| header.iter().position(|h| h == name);
    let (Some(name_col), Some(version_col), Some(license_col)) =
        (column("Name"), column("Version"), column("Licenses"))
    else {
        tracing::warn!("Package list header lacks Name/Version/Licenses columns");
        return Vec::new();
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = split_csv_line(line);
            let (Some(name), Some(version), Some(license)) = (
                fields.get(name_col),
                fields.get(version_col),
                fields.get(license_col),
            ) else {
                tracing::warn!("Could not parse line: {}", line);
                return None;
            };
            Some(PackageRecord {
                name: strip_arch(name).to_string(),
                version: version.clone(),
                licenses: dpkg_license_tokens(license),
            })
        })
        .collect()
}

fn strip_arch(name: &str) -> &str {
    DPKG_ARCH_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}

fn dpkg_license_tokens(field: &str) -> LicenseTokens {
    let mut tokens: Vec<String> = split_license_field(field)
        .iter()
        .map(|token| rename_operands(token))
        .collect();
    if tokens.len() > 1 {
        LicenseTokens::Multiple(tokens)
    } else {
        LicenseTokens::Single(tokens.pop().unwrap_or_default())
    }
}

/// Rename each side of an `X with Y` token separately.
fn rename_operands(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case("with") {
                word
            } else {
                debian_license_rename(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a license column on whitespace, keeping `X with Y` together.
///
/// ```
/// use make_sbom::sources::split_license_field;
///
/// assert_eq!(
///     split_license_field("GPL-2.0-only WITH Linux-syscall-note MIT"),
///     vec!["GPL-2.0-only WITH Linux-syscall-note", "MIT"]
/// );
/// ```
#[must_use]
pub fn split_license_field(field: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut join_next = false;
    for word in field.split_whitespace() {
        let is_with = word.eq_ignore_ascii_case("with");
        match tokens.last_mut() {
            Some(last) if join_next || is_with => {
                last.push(' ');
                last.push_str(word);
            }
            _ => tokens.push(word.to_string()),
        }
        join_next = is_with;
    }
    tokens
}

/// Split one CSV record. Fields may be quoted; `""` inside quotes is a quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Packages read from a listing file.
#[derive(Debug, Clone)]
pub struct PackagesSbom {
    packages: Vec<Package>,
    origin: PathBuf,
}

impl PackagesSbom {
    /// Read a listing from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SbomError::io(path, e))?;
        Ok(Self::from_content(&content, path))
    }

    /// Read a listing already in memory.
    #[must_use]
    pub fn from_content(content: &str, origin: &Path) -> Self {
        let packages: Vec<Package> = parse_package_list(content)
            .iter()
            .map(PackageRecord::to_package)
            .collect();
        if packages.is_empty() {
            tracing::warn!("No packages found in {}", origin.display());
        }
        Self {
            packages,
            origin: origin.to_path_buf(),
        }
    }

    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

impl SbomSource for PackagesSbom {
    fn describe(&self) -> String {
        format!("package list {}", self.origin.display())
    }

    fn contribution(&self) -> SourceContribution {
        SourceContribution {
            link_targets: self.packages.iter().map(|p| p.id.clone()).collect(),
            packages: self.packages.clone(),
            ..SourceContribution::default()
        }
    }

    fn standalone(&self) -> Option<StandaloneDocument> {
        None
    }
}
