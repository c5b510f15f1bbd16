//! The SBOM document container.

use super::relationship::ContainmentGraph;
use super::{
    Extensions, ExtractedLicensingInfo, File, Package, Relationship, RelationshipType, SpdxId,
};
use crate::error::{Result, SbomError};
use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashSet;
use std::fmt;

/// SPDX version written into documents this crate creates
pub const SPDX_VERSION: &str = "SPDX-2.2";

/// Data license every SPDX document carries
pub const DATA_LICENSE: &str = "CC0-1.0";

/// Kind of entity that created a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreatorType {
    Organization,
    Person,
    Tool,
}

impl CreatorType {
    /// Parse the spelling used both in SPDX creator strings and manifest keys
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Organization" => Some(Self::Organization),
            "Person" => Some(Self::Person),
            "Tool" => Some(Self::Tool),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Person => "Person",
            Self::Tool => "Tool",
        }
    }
}

/// One creator actor (`Tool: syft-0.84.0`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub creator_type: CreatorType,
    pub name: String,
}

impl Creator {
    pub fn new(creator_type: CreatorType, name: impl Into<String>) -> Self {
        Self {
            creator_type,
            name: name.into(),
        }
    }

    /// Parse an SPDX creator string, `None` if the type prefix is unknown.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (kind, name) = text.split_once(':')?;
        let creator_type = CreatorType::from_key(kind.trim())?;
        Some(Self::new(creator_type, name.trim()))
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.creator_type.as_str(), self.name)
    }
}

/// Document-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct CreationInfo {
    pub spdx_version: String,
    pub name: String,
    pub namespace: String,
    pub creators: Vec<Creator>,
    pub created: DateTime<Utc>,
    pub data_license: String,
    pub license_list_version: Option<String>,
    pub comment: Option<String>,
}

impl CreationInfo {
    /// Metadata for a new document created now, truncated to whole seconds.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, creators: Vec<Creator>) -> Self {
        Self {
            spdx_version: SPDX_VERSION.to_string(),
            name: name.into(),
            namespace: namespace.into(),
            creators,
            created: Utc::now().trunc_subsecs(0),
            data_license: DATA_LICENSE.to_string(),
            license_list_version: None,
            comment: None,
        }
    }
}

/// All collections of a document, unchecked.
///
/// Used to reshape documents read from other tools before they are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentParts {
    pub id: SpdxId,
    pub creation_info: CreationInfo,
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub relationships: Vec<Relationship>,
    pub extracted_licensing_info: Vec<ExtractedLicensingInfo>,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, Default)]
struct DocumentIndex {
    element_ids: HashSet<SpdxId>,
    relationships: HashSet<Relationship>,
    containment: ContainmentGraph,
    has_root_describes: bool,
}

impl DocumentIndex {
    fn build(parts: &DocumentParts) -> Self {
        let mut index = Self::default();
        for package in &parts.packages {
            index.element_ids.insert(package.id.clone());
        }
        for file in &parts.files {
            index.element_ids.insert(file.id.clone());
        }
        for relationship in &parts.relationships {
            index.record(relationship);
        }
        index
    }

    fn record(&mut self, relationship: &Relationship) {
        if relationship.kind == RelationshipType::Contains {
            self.containment
                .insert(&relationship.element, &relationship.related);
        }
        if relationship.is_root_describes() {
            self.has_root_describes = true;
        }
        self.relationships.insert(relationship.clone());
    }
}

/// An SPDX document.
///
/// Collections are read-only from outside; the `add_*` methods are the only
/// way to grow them and each one checks the document invariants:
///
/// - package and file identifiers are unique
/// - a package whose files were not analyzed has no verification code
/// - no file carries an all-zero placeholder checksum
/// - at most one DESCRIBES edge leaves `SPDXRef-DOCUMENT`
/// - relationships are not repeated and CONTAINS edges form no cycle
#[derive(Debug, Clone)]
pub struct Document {
    parts: DocumentParts,
    index: DocumentIndex,
}

impl Document {
    /// Create an empty document
    #[must_use]
    pub fn new(creation_info: CreationInfo) -> Self {
        Self::from_parts(DocumentParts {
            id: SpdxId::document_root(),
            creation_info,
            packages: Vec::new(),
            files: Vec::new(),
            relationships: Vec::new(),
            extracted_licensing_info: Vec::new(),
            extensions: Extensions::new(),
        })
    }

    /// Assemble a document from existing collections without checking them.
    #[must_use]
    pub fn from_parts(parts: DocumentParts) -> Self {
        let index = DocumentIndex::build(&parts);
        Self { parts, index }
    }

    /// Take the document apart
    #[must_use]
    pub fn into_parts(self) -> DocumentParts {
        self.parts
    }

    #[must_use]
    pub fn id(&self) -> &SpdxId {
        &self.parts.id
    }

    #[must_use]
    pub fn creation_info(&self) -> &CreationInfo {
        &self.parts.creation_info
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.parts.creation_info.name
    }

    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.parts.packages
    }

    #[must_use]
    pub fn files(&self) -> &[File] {
        &self.parts.files
    }

    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.parts.relationships
    }

    #[must_use]
    pub fn extracted_licensing_info(&self) -> &[ExtractedLicensingInfo] {
        &self.parts.extracted_licensing_info
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    /// Find a package by identifier
    #[must_use]
    pub fn package(&self, id: &SpdxId) -> Option<&Package> {
        self.parts.packages.iter().find(|p| &p.id == id)
    }

    /// Find a file by identifier
    #[must_use]
    pub fn file(&self, id: &SpdxId) -> Option<&File> {
        self.parts.files.iter().find(|f| &f.id == id)
    }

    /// Whether a package or file with this identifier exists
    #[must_use]
    pub fn contains_element(&self, id: &SpdxId) -> bool {
        self.index.element_ids.contains(id)
    }

    /// Targets of the document root's DESCRIBES edges
    pub fn described_elements(&self) -> impl Iterator<Item = &SpdxId> {
        self.parts
            .relationships
            .iter()
            .filter(|r| r.is_root_describes())
            .map(|r| &r.related)
    }

    /// Append a package.
    pub fn add_package(&mut self, package: Package) -> Result<()> {
        if !package.files_analyzed && package.verification_code.is_some() {
            return Err(SbomError::validation(format!(
                "package {} has a verification code but its files were not analyzed",
                package.id
            )));
        }
        self.claim_id(&package.id)?;
        self.parts.packages.push(package);
        Ok(())
    }

    /// Append a file.
    pub fn add_file(&mut self, file: File) -> Result<()> {
        if file.is_placeholder() {
            return Err(SbomError::validation(format!(
                "file {} ({}) has an all-zero placeholder checksum",
                file.id, file.name
            )));
        }
        self.claim_id(&file.id)?;
        self.parts.files.push(file);
        Ok(())
    }

    /// Append a relationship.
    ///
    /// Returns `false` when the edge was dropped: an exact repeat, a second root
    /// DESCRIBES edge, or a CONTAINS edge that would close a cycle.
    pub fn add_relationship(&mut self, relationship: Relationship) -> bool {
        if self.index.relationships.contains(&relationship) {
            tracing::debug!("Dropping duplicate relationship: {}", relationship);
            return false;
        }
        if relationship.is_root_describes() && self.index.has_root_describes {
            tracing::warn!(
                "Dropping second DESCRIBES relationship from the document root: {}",
                relationship
            );
            return false;
        }
        if relationship.kind == RelationshipType::Contains
            && self
                .index
                .containment
                .reaches(&relationship.related, &relationship.element)
        {
            tracing::warn!(
                "Dropping CONTAINS relationship that would create a cycle: {}",
                relationship
            );
            return false;
        }
        self.index.record(&relationship);
        self.parts.relationships.push(relationship);
        true
    }

    /// Fail on a package whose files were analyzed but that neither contains
    /// a file nor carries license information gathered from files.
    ///
    /// File edges arrive after their packages, so this runs on a finished
    /// document rather than in [`Document::add_package`].
    pub fn check_files_analyzed(&self) -> Result<()> {
        for package in self.parts.packages.iter().filter(|p| p.files_analyzed) {
            let has_file_info = package
                .license_info_from_files
                .as_ref()
                .is_some_and(|values| !values.is_empty());
            let contains_file = self.parts.relationships.iter().any(|r| {
                r.kind == RelationshipType::Contains
                    && r.element == package.id
                    && self.file(&r.related).is_some()
            });
            if !has_file_info && !contains_file {
                return Err(SbomError::validation(format!(
                    "package {} ({}) claims analyzed files but contains none",
                    package.id, package.name
                )));
            }
        }
        Ok(())
    }

    /// Append a non-standard license definition
    pub fn add_extracted_licensing_info(&mut self, info: ExtractedLicensingInfo) {
        self.parts.extracted_licensing_info.push(info);
    }

    fn claim_id(&mut self, id: &SpdxId) -> Result<()> {
        if !self.index.element_ids.insert(id.clone()) {
            return Err(SbomError::validation(format!(
                "duplicate SPDX identifier {id}"
            )));
        }
        Ok(())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Checksum, ChecksumAlgorithm, LicenseValue, VerificationCode};

    fn empty_document() -> Document {
        Document::new(CreationInfo::new(
            "image.swu",
            "https://example.com/sbom/image",
            vec![Creator::new(CreatorType::Tool, "make-sbom")],
        ))
    }

    #[test]
    fn test_creation_info_defaults() {
        let doc = empty_document();
        assert!(doc.id().is_document_root());
        assert_eq!(doc.creation_info().spdx_version, "SPDX-2.2");
        assert_eq!(doc.creation_info().data_license, "CC0-1.0");
        assert_eq!(doc.creation_info().created.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_creator_parse() {
        let creator = Creator::parse("Organization: Atmark Techno").expect("known type");
        assert_eq!(creator.creator_type, CreatorType::Organization);
        assert_eq!(creator.name, "Atmark Techno");
        assert_eq!(creator.to_string(), "Organization: Atmark Techno");
        assert!(Creator::parse("Robot: R2").is_none());
    }

    #[test]
    fn test_duplicate_package_id_is_rejected() {
        let mut doc = empty_document();
        let id = SpdxId::deterministic("busybox");
        doc.add_package(Package::new(id.clone(), "busybox")).expect("first add");
        let err = doc.add_package(Package::new(id, "busybox")).unwrap_err();
        assert!(matches!(err, SbomError::Validation(_)));
        assert_eq!(doc.packages().len(), 1);
    }

    #[test]
    fn test_analyzed_package_must_account_for_files() {
        let mut doc = empty_document();
        let mut pkg = Package::new(SpdxId::deterministic("image.swu"), "image.swu");
        pkg.files_analyzed = true;
        doc.add_package(pkg.clone()).expect("add");
        assert!(doc.check_files_analyzed().is_err());

        let mut doc = empty_document();
        pkg.license_info_from_files = Some(vec![LicenseValue::NoAssertion]);
        doc.add_package(pkg.clone()).expect("add");
        assert!(doc.check_files_analyzed().is_ok());

        let mut doc = empty_document();
        pkg.license_info_from_files = None;
        let file = File::new(SpdxId::new("SPDXRef-File-busybox"), "busybox");
        doc.add_relationship(Relationship::contains(pkg.id.clone(), file.id.clone()));
        doc.add_package(pkg).expect("add");
        doc.add_file(file).expect("add file");
        assert!(doc.check_files_analyzed().is_ok());
    }

    #[test]
    fn test_unanalyzed_package_with_verification_code_is_rejected() {
        let mut doc = empty_document();
        let mut pkg = Package::new(SpdxId::unique("zlib"), "zlib");
        pkg.verification_code = Some(VerificationCode::new("abc"));
        assert!(doc.add_package(pkg).is_err());
    }

    #[test]
    fn test_placeholder_file_is_rejected() {
        let mut doc = empty_document();
        let mut file = File::new(SpdxId::new("SPDXRef-File-x"), "x");
        file.checksums
            .push(Checksum::new(ChecksumAlgorithm::Sha1, "0".repeat(40)));
        assert!(doc.add_file(file).is_err());
        assert!(doc.files().is_empty());
    }

    #[test]
    fn test_single_root_describes() {
        let mut doc = empty_document();
        let first = Relationship::new(
            SpdxId::document_root(),
            RelationshipType::Describes,
            SpdxId::deterministic("a"),
        );
        let second = Relationship::new(
            SpdxId::document_root(),
            RelationshipType::Describes,
            SpdxId::deterministic("b"),
        );
        assert!(doc.add_relationship(first));
        assert!(!doc.add_relationship(second));
        assert_eq!(doc.described_elements().count(), 1);
    }

    #[test]
    fn test_duplicate_relationship_is_dropped() {
        let mut doc = empty_document();
        let rel = Relationship::contains(SpdxId::new("SPDXRef-a"), SpdxId::new("SPDXRef-b"));
        assert!(doc.add_relationship(rel.clone()));
        assert!(!doc.add_relationship(rel));
        assert_eq!(doc.relationships().len(), 1);
    }

    #[test]
    fn test_containment_cycle_is_dropped() {
        let mut doc = empty_document();
        let a = SpdxId::new("SPDXRef-a");
        let b = SpdxId::new("SPDXRef-b");
        assert!(doc.add_relationship(Relationship::contains(a.clone(), b.clone())));
        assert!(!doc.add_relationship(Relationship::contains(b, a.clone())));
        assert!(!doc.add_relationship(Relationship::contains(a.clone(), a)));
    }

    #[test]
    fn test_parts_roundtrip() {
        let mut doc = empty_document();
        doc.add_package(Package::new(SpdxId::deterministic("a"), "a"))
            .expect("add");
        let rebuilt = Document::from_parts(doc.clone().into_parts());
        assert_eq!(rebuilt, doc);
    }
}
