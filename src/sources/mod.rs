//! Source adapters.
//!
//! Each adapter turns one raw inventory into the same shape, a
//! [`SourceContribution`]: fresh packages, files, license definitions and
//! relationships for the assembler to append, plus the elements the importing
//! root should CONTAINS-link to. Adapters never hold on to the document they
//! are merged into.
//!
//! | Adapter | Input |
//! |---|---|
//! | [`ManifestSbom`] | YAML manifest + the artifact; builds the root document |
//! | [`PackagesSbom`] | `apk` / `dpkg-licenses` package listing |
//! | [`ScanSbom`] | content scanner output for a path |
//! | [`ExternalSbom`] | an SPDX document produced elsewhere |

mod external;
mod manifest;
mod package_list;
mod scan;

pub use external::ExternalSbom;
pub use manifest::ManifestSbom;
pub use package_list::{
    parse_package_list, split_license_field, PackageListDialect, PackageRecord, PackagesSbom,
};
pub use scan::ScanSbom;

use crate::model::{
    Document, DocumentParts, ExtractedLicensingInfo, File, Package, Relationship, SpdxId,
};
use std::path::{Path, PathBuf};

/// Records one source adds to the assembled document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceContribution {
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub extracted_licensing_info: Vec<ExtractedLicensingInfo>,
    pub relationships: Vec<Relationship>,
    /// Elements the importing root gets a CONTAINS edge to
    pub link_targets: Vec<SpdxId>,
}

impl SourceContribution {
    /// Take over a foreign document's records, minus every relationship that
    /// starts at that document's own root.
    pub(crate) fn from_embedded(parts: DocumentParts) -> Self {
        let root = parts.id;
        let (dropped, relationships): (Vec<_>, Vec<_>) = parts
            .relationships
            .into_iter()
            .partition(|r| r.element == root);
        for rel in &dropped {
            tracing::debug!("Dropping embedded document relationship: {}", rel);
        }
        Self {
            packages: parts.packages,
            files: parts.files,
            extracted_licensing_info: parts.extracted_licensing_info,
            relationships,
            link_targets: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.files.is_empty()
            && self.extracted_licensing_info.is_empty()
            && self.relationships.is_empty()
            && self.link_targets.is_empty()
    }
}

/// A document a source can emit on its own when there is no manifest.
#[derive(Debug, Clone)]
pub struct StandaloneDocument {
    pub document: Document,
    /// Path the source was read from; the output is named after it
    pub origin: PathBuf,
}

/// An inventory that can be merged into the assembled document.
pub trait SbomSource {
    /// Short description for log lines
    fn describe(&self) -> String;

    /// Records to merge under the importing root
    fn contribution(&self) -> SourceContribution;

    /// The document written in pass-through mode, `None` when the source
    /// has nothing to stand on without a root
    fn standalone(&self) -> Option<StandaloneDocument>;
}

/// Final path component as text.
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreationInfo, RelationshipType};

    #[test]
    fn test_from_embedded_drops_root_relationships() {
        let mut doc = Document::new(CreationInfo::new("app", "https://example.com/app", vec![]));
        let pkg = SpdxId::new("SPDXRef-Package-app");
        let file = SpdxId::new("SPDXRef-File-app");
        doc.add_relationship(Relationship::new(
            SpdxId::document_root(),
            RelationshipType::Describes,
            pkg.clone(),
        ));
        doc.add_relationship(Relationship::contains(pkg.clone(), file));

        let contribution = SourceContribution::from_embedded(doc.into_parts());
        assert_eq!(contribution.relationships.len(), 1);
        assert_eq!(contribution.relationships[0].element, pkg);
        assert!(contribution.link_targets.is_empty());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("/work/rootfs.tar.gz")), "rootfs.tar.gz");
        assert_eq!(base_name(Path::new("rootfs")), "rootfs");
    }
}
