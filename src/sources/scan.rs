//! Scan-result adapter.
//!
//! Cleans the raw document a content scanner produced for one path. The
//! steps run in a fixed order:
//!
//! 1. find the package that stands for the scan target itself
//! 2. drop stale verification codes and malformed download locations
//! 3. drop files the scanner attached to packages whose files were not analyzed
//! 4. reduce file names to base names and drop all-zero placeholder files

use super::{base_name, SbomSource, SourceContribution, StandaloneDocument};
use crate::error::Result;
use crate::model::{
    Document, DocumentParts, DownloadLocation, LicenseValue, RelationshipType, SpdxId,
};
use crate::scanner::ContentScanner;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A cleaned scan document.
#[derive(Debug, Clone)]
pub struct ScanSbom {
    document: Document,
    target: Option<SpdxId>,
    origin: PathBuf,
}

impl ScanSbom {
    /// Run `scanner` on `target` and clean its output.
    pub fn scan(scanner: &dyn ContentScanner, target: &Path) -> Result<Self> {
        let raw = scanner.scan(target)?;
        Ok(Self::new(raw, target))
    }

    /// Clean a raw scan document for `target`.
    #[must_use]
    pub fn new(raw: Document, target: &Path) -> Self {
        let mut parts = raw.into_parts();
        let target_id = identify_target(&mut parts, target);
        fix_package_metadata(&mut parts);
        remove_unanalyzed_files(&mut parts);
        clean_files(&mut parts);

        if target_id.is_none() {
            tracing::debug!(
                "No package named after {} in scan result, nothing is linked to the root",
                target.display()
            );
        }
        Self {
            document: Document::from_parts(parts),
            target: target_id,
            origin: target.to_path_buf(),
        }
    }

    /// The package that stands for the scan target, if the scanner reported one
    #[must_use]
    pub fn target_package(&self) -> Option<&SpdxId> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// The first package named after the target's file name or full path.
///
/// When several packages match, the first one wins; later matches stay
/// ordinary packages. A match on the full path is renamed to the file name.
fn identify_target(parts: &mut DocumentParts, target: &Path) -> Option<SpdxId> {
    let file_name = base_name(target);
    let full_path = target.to_string_lossy();
    let package = parts
        .packages
        .iter_mut()
        .find(|p| p.name == file_name || p.name == full_path)?;
    package.name = file_name;
    Some(package.id.clone())
}

fn fix_package_metadata(parts: &mut DocumentParts) {
    for package in &mut parts.packages {
        if !package.files_analyzed {
            package.verification_code = None;
        }
        if !package.download_location.is_valid() {
            tracing::debug!(
                "{}: invalid download location '{}', using NOASSERTION",
                package.name,
                package.download_location
            );
            package.download_location = DownloadLocation::NoAssertion;
        }
    }
}

fn remove_unanalyzed_files(parts: &mut DocumentParts) {
    let stray: HashSet<SpdxId> = {
        let unanalyzed: HashSet<&SpdxId> = parts
            .packages
            .iter()
            .filter(|p| !p.files_analyzed)
            .map(|p| &p.id)
            .collect();
        let file_ids: HashSet<&SpdxId> = parts.files.iter().map(|f| &f.id).collect();
        parts
            .relationships
            .iter()
            .filter(|r| {
                r.kind == RelationshipType::Contains
                    && unanalyzed.contains(&r.element)
                    && file_ids.contains(&r.related)
            })
            .map(|r| r.related.clone())
            .collect()
    };

    if !stray.is_empty() {
        tracing::debug!(
            "Removing {} files attached to packages whose files were not analyzed",
            stray.len()
        );
        remove_files(parts, &stray);
    }
}

fn clean_files(parts: &mut DocumentParts) {
    let mut placeholders = HashSet::new();
    for file in &mut parts.files {
        file.name = file
            .name
            .rsplit('/')
            .next()
            .unwrap_or(file.name.as_str())
            .to_string();
        file.license_info_in_file = vec![LicenseValue::NoAssertion];
        if file.is_placeholder() {
            placeholders.insert(file.id.clone());
        }
    }

    if !placeholders.is_empty() {
        tracing::debug!("Removing {} placeholder files", placeholders.len());
        remove_files(parts, &placeholders);
    }
}

/// Remove files and every relationship naming them.
pub(super) fn remove_files(parts: &mut DocumentParts, ids: &HashSet<SpdxId>) {
    parts.files.retain(|f| !ids.contains(&f.id));
    parts
        .relationships
        .retain(|r| !ids.contains(&r.element) && !ids.contains(&r.related));
}

impl SbomSource for ScanSbom {
    fn describe(&self) -> String {
        format!("scan of {}", self.origin.display())
    }

    fn contribution(&self) -> SourceContribution {
        let mut contribution = SourceContribution::from_embedded(self.document.clone().into_parts());
        contribution.link_targets.extend(self.target.iter().cloned());
        contribution
    }

    fn standalone(&self) -> Option<StandaloneDocument> {
        Some(StandaloneDocument {
            document: self.document.clone(),
            origin: self.origin.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Checksum, ChecksumAlgorithm, CreationInfo, File, Package, Relationship, VerificationCode,
    };

    fn file(id: &str, name: &str, digest: &str) -> File {
        let mut file = File::new(SpdxId::new(id), name);
        file.checksums
            .push(Checksum::new(ChecksumAlgorithm::Sha1, digest));
        file.license_info_in_file = Vec::new();
        file
    }

    /// A scan of `/work/rootfs.tar` the way a scanner reports it, built
    /// through `from_parts` so the raw problems survive.
    fn raw_scan() -> Document {
        let mut target = Package::new(SpdxId::new("SPDXRef-DocumentRoot-File-rootfs"), "/work/rootfs.tar");
        target.files_analyzed = true;

        let mut busybox = Package::new(SpdxId::new("SPDXRef-Package-busybox"), "busybox");
        busybox.verification_code = Some(VerificationCode::new("stale"));
        busybox.download_location = DownloadLocation::Uri("not a url".to_string());

        let mut zlib = Package::new(SpdxId::new("SPDXRef-Package-zlib"), "zlib");
        zlib.files_analyzed = true;
        zlib.download_location = DownloadLocation::Uri("https://zlib.net/".to_string());

        let relationships = vec![
            Relationship::new(
                SpdxId::document_root(),
                RelationshipType::Describes,
                target.id.clone(),
            ),
            Relationship::contains(busybox.id.clone(), SpdxId::new("SPDXRef-File-busybox")),
            Relationship::contains(zlib.id.clone(), SpdxId::new("SPDXRef-File-libz")),
            Relationship::contains(zlib.id.clone(), SpdxId::new("SPDXRef-File-empty")),
            Relationship::contains(target.id.clone(), busybox.id.clone()),
        ];

        Document::from_parts(DocumentParts {
            id: SpdxId::document_root(),
            creation_info: CreationInfo::new("/work/rootfs.tar", "https://example.com/scan", vec![]),
            packages: vec![target, busybox, zlib],
            files: vec![
                file("SPDXRef-File-busybox", "/bin/busybox", "0aa4f4b8e1d2"),
                file("SPDXRef-File-libz", "/lib/libz.so.1", "93a1bc4d1f0e"),
                file("SPDXRef-File-empty", "/etc/empty", "0000000000000000"),
            ],
            relationships,
            extracted_licensing_info: Vec::new(),
            extensions: Default::default(),
        })
    }

    fn cleaned() -> ScanSbom {
        ScanSbom::new(raw_scan(), Path::new("/work/rootfs.tar"))
    }

    #[test]
    fn test_target_matched_by_full_path_is_renamed() {
        let scan = cleaned();
        let target = scan.target_package().expect("target found");
        assert_eq!(target.as_str(), "SPDXRef-DocumentRoot-File-rootfs");
        let package = scan.document().package(target).expect("package");
        assert_eq!(package.name, "rootfs.tar");
    }

    #[test]
    fn test_first_matching_package_is_the_target() {
        let mut parts = raw_scan().into_parts();
        parts.packages.push(Package::new(
            SpdxId::new("SPDXRef-DocumentRoot-Directory-rootfs"),
            "rootfs.tar",
        ));
        let scan = ScanSbom::new(Document::from_parts(parts), Path::new("/work/rootfs.tar"));

        let target = scan.target_package().expect("target found");
        assert_eq!(target.as_str(), "SPDXRef-DocumentRoot-File-rootfs");
        let later = scan
            .document()
            .package(&SpdxId::new("SPDXRef-DocumentRoot-Directory-rootfs"))
            .expect("later match kept");
        assert_eq!(later.name, "rootfs.tar");
    }

    #[test]
    fn test_package_metadata_is_fixed() {
        let scan = cleaned();
        let busybox = scan
            .document()
            .package(&SpdxId::new("SPDXRef-Package-busybox"))
            .expect("busybox");
        assert!(busybox.verification_code.is_none());
        assert_eq!(busybox.download_location, DownloadLocation::NoAssertion);

        let zlib = scan
            .document()
            .package(&SpdxId::new("SPDXRef-Package-zlib"))
            .expect("zlib");
        assert_eq!(
            zlib.download_location,
            DownloadLocation::Uri("https://zlib.net/".to_string())
        );
    }

    #[test]
    fn test_unanalyzed_package_files_are_removed() {
        let scan = cleaned();
        let doc = scan.document();
        assert!(doc.files().iter().all(|f| f.id.as_str() != "SPDXRef-File-busybox"));
        assert!(doc
            .relationships()
            .iter()
            .all(|r| !r.references(&SpdxId::new("SPDXRef-File-busybox"))));
    }

    #[test]
    fn test_placeholder_files_are_removed() {
        let scan = cleaned();
        let doc = scan.document();
        assert_eq!(doc.files().len(), 1);
        assert!(doc.files().iter().all(|f| !f.is_placeholder()));
        assert!(doc
            .relationships()
            .iter()
            .all(|r| !r.references(&SpdxId::new("SPDXRef-File-empty"))));
    }

    #[test]
    fn test_surviving_files_are_normalized() {
        let scan = cleaned();
        let libz = &scan.document().files()[0];
        assert_eq!(libz.name, "libz.so.1");
        assert_eq!(libz.license_info_in_file, vec![LicenseValue::NoAssertion]);
    }

    #[test]
    fn test_contribution_links_target_and_drops_root_edges() {
        let contribution = cleaned().contribution();
        assert_eq!(
            contribution.link_targets,
            vec![SpdxId::new("SPDXRef-DocumentRoot-File-rootfs")]
        );
        assert!(contribution
            .relationships
            .iter()
            .all(|r| !r.element.is_document_root()));
        assert_eq!(contribution.packages.len(), 3);
    }

    #[test]
    fn test_no_target_links_nothing() {
        let scan = ScanSbom::new(raw_scan(), Path::new("/work/other.tar"));
        assert!(scan.target_package().is_none());
        let contribution = scan.contribution();
        assert!(contribution.link_targets.is_empty());
        assert_eq!(contribution.packages.len(), 3);
    }

    #[test]
    fn test_standalone_keeps_describes() {
        let standalone = cleaned().standalone().expect("scan stands alone");
        assert_eq!(standalone.document.described_elements().count(), 1);
        assert_eq!(standalone.origin, PathBuf::from("/work/rootfs.tar"));
    }
}
