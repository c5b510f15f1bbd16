//! Manifest adapter: builds the root document for an artifact.

use super::base_name;
use crate::config::{ManifestConfig, ManifestPackage};
use crate::error::{ErrorContext, Result};
use crate::license::try_normalize;
use crate::model::{
    Checksum, ChecksumAlgorithm, CreationInfo, Document, DownloadLocation, LicenseValue, Package,
    Relationship, RelationshipType, SpdxId, TextValue, VerificationCode,
};
use crate::utils::{sha1_file, sha256_file};
use std::path::Path;

/// The document rooted at the artifact the SBOM describes.
#[derive(Debug, Clone)]
pub struct ManifestSbom {
    document: Document,
    root: SpdxId,
}

impl ManifestSbom {
    /// Build the root document.
    ///
    /// The primary package is named after the artifact's file name and gets
    /// its deterministic identifier, a SHA-1 verification code and a SHA-256
    /// checksum. Every other manifest entry becomes a package with a unique
    /// identifier and an ANCESTOR_OF edge to the primary package.
    pub fn new(artifact: &Path, manifest: &ManifestConfig) -> Result<Self> {
        let file_name = base_name(artifact);
        let root = SpdxId::deterministic(&file_name);

        let creation_info = CreationInfo::new(
            file_name.as_str(),
            manifest.namespace()?,
            manifest.creators()?,
        );
        let mut document = Document::new(creation_info);
        document.add_relationship(Relationship::new(
            SpdxId::document_root(),
            RelationshipType::Describes,
            root.clone(),
        ));

        let main_entry = manifest.main_package()?;
        let mut main = manifest_package(root.clone(), &file_name, main_entry)
            .with_context(|| format!("Package.{}", crate::config::MAIN_PACKAGE_KEY))?;
        main.file_name = Some(format!("./{file_name}"));
        main.files_analyzed = true;
        main.verification_code = Some(VerificationCode::new(sha1_file(artifact)?));
        main.license_info_from_files = Some(vec![LicenseValue::NoAssertion]);
        main.checksums = vec![Checksum::new(
            ChecksumAlgorithm::Sha256,
            sha256_file(artifact)?,
        )];
        document.add_package(main)?;

        for (key, entry) in manifest.other_packages() {
            let id = SpdxId::unique(key);
            let package = manifest_package(id.clone(), key, entry)
                .with_context(|| format!("Package.{key}"))?;
            document.add_package(package)?;
            document.add_relationship(Relationship::new(
                id,
                RelationshipType::AncestorOf,
                root.clone(),
            ));
        }

        tracing::debug!(
            "Manifest declares {} packages for {}",
            document.packages().len(),
            file_name
        );
        Ok(Self { document, root })
    }

    /// Build the root document from files on disk.
    pub fn from_paths(artifact: &Path, manifest_path: &Path) -> Result<Self> {
        let manifest = crate::config::load_manifest(manifest_path)?;
        Self::new(artifact, &manifest).with_context(|| manifest_path.display().to_string())
    }

    /// Identifier of the primary package, the importing root for every
    /// other source
    #[must_use]
    pub fn root(&self) -> &SpdxId {
        &self.root
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Package fields shared by the primary package and the declared ones.
fn manifest_package(id: SpdxId, name: &str, entry: &ManifestPackage) -> Result<Package> {
    let mut package = Package::new(id, name);
    package.version = entry.version_text()?;
    package.download_location = manifest_download_location(name, entry.download_location.as_deref());
    package.copyright_text = TextValue::or_no_assertion(entry.copyright_text.as_deref());

    let mut comments = Vec::new();
    package.license_concluded =
        manifest_license(name, entry.license_concluded.as_deref(), &mut comments);
    package.license_declared =
        manifest_license(name, entry.license_declared.as_deref(), &mut comments);
    if !comments.is_empty() {
        comments.dedup();
        package.license_comment = Some(comments.join(" "));
    }
    Ok(package)
}

fn manifest_download_location(name: &str, value: Option<&str>) -> DownloadLocation {
    match value {
        Some(text) if !text.trim().is_empty() => {
            let location = DownloadLocation::from_field(text.trim());
            if location.is_valid() {
                location
            } else {
                tracing::warn!("{}: invalid download location '{}', using NOASSERTION", name, text);
                DownloadLocation::NoAssertion
            }
        }
        _ => DownloadLocation::NoAssertion,
    }
}

fn manifest_license(name: &str, value: Option<&str>, comments: &mut Vec<String>) -> LicenseValue {
    let Some(token) = value else {
        return LicenseValue::NoAssertion;
    };
    match try_normalize(token) {
        Ok(Some(expr)) => LicenseValue::Expression(expr),
        Ok(None) => LicenseValue::NoAssertion,
        Err(e) => {
            tracing::warn!("{}: {}", name, e);
            comments.push(format!("The following licenses could not be estimated '{token}'"));
            LicenseValue::NoAssertion
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn manifest(yaml: &str) -> ManifestConfig {
        serde_yaml::from_str(yaml).expect("valid manifest")
    }

    fn artifact() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("image_v1+rc.swu");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"hello world").expect("write");
        (dir, path)
    }

    const BASE: &str = "
Document:
  documentNamespace: https://example.com/sbom/image
  creators:
    - Tool: make-sbom
Package:
  mainPackage:
    version: 1.0
  libfoo:
    version: 2.0
";

    #[test]
    fn test_primary_package() {
        let (_dir, path) = artifact();
        let sbom = ManifestSbom::new(&path, &manifest(BASE)).expect("builds");
        let doc = sbom.document();

        assert_eq!(doc.name(), "image_v1+rc.swu");
        assert_eq!(sbom.root().as_str(), "SPDXRef-image-v1prc.swu");

        let main = doc.package(sbom.root()).expect("primary package");
        assert_eq!(main.name, "image_v1+rc.swu");
        assert_eq!(main.file_name.as_deref(), Some("./image_v1+rc.swu"));
        assert!(main.files_analyzed);
        assert_eq!(
            main.verification_code.as_ref().map(|c| c.value.as_str()),
            Some("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        assert_eq!(main.checksums.len(), 1);
        assert_eq!(main.checksums[0].algorithm, ChecksumAlgorithm::Sha256);
        assert!(main.license_concluded.is_no_assertion());
        assert!(main.license_declared.is_no_assertion());
        assert_eq!(main.download_location, DownloadLocation::NoAssertion);
        assert_eq!(main.copyright_text, TextValue::NoAssertion);
    }

    #[test]
    fn test_declared_packages_are_ancestors() {
        let (_dir, path) = artifact();
        let sbom = ManifestSbom::new(&path, &manifest(BASE)).expect("builds");
        let doc = sbom.document();

        let libfoo = doc
            .packages()
            .iter()
            .find(|p| p.name == "libfoo")
            .expect("libfoo");
        assert!(libfoo.id.as_str().starts_with("SPDXRef-libfoo-"));
        assert_eq!(libfoo.version.as_deref(), Some("2.0"));
        assert!(!libfoo.files_analyzed);
        assert!(libfoo.verification_code.is_none());

        let ancestors: Vec<_> = doc
            .relationships()
            .iter()
            .filter(|r| r.kind == RelationshipType::AncestorOf)
            .collect();
        assert_eq!(ancestors.len(), 1);
        assert_eq!(ancestors[0].element, libfoo.id);
        assert_eq!(&ancestors[0].related, sbom.root());

        let described: Vec<_> = doc.described_elements().collect();
        assert_eq!(described, vec![sbom.root()]);
    }

    #[test]
    fn test_license_fields_are_normalized() {
        let yaml = BASE.replace(
            "    version: 1.0\n",
            "    version: 1.0\n    licenseDeclared: GPL-2+\n    licenseConcluded: Freely redistributable\n",
        );
        let (_dir, path) = artifact();
        let sbom = ManifestSbom::new(&path, &manifest(&yaml)).expect("builds");
        let main = sbom.document().package(sbom.root()).expect("main");

        assert_eq!(main.license_declared.to_string(), "GPL-2.0-or-later");
        assert!(main.license_concluded.is_no_assertion());
        assert!(main
            .license_comment
            .as_deref()
            .is_some_and(|c| c.contains("Freely redistributable")));
    }

    #[test]
    fn test_invalid_download_location_becomes_no_assertion() {
        let yaml = BASE.replace(
            "    version: 2.0\n",
            "    version: 2.0\n    downloadLocation: not a url\n",
        );
        let (_dir, path) = artifact();
        let sbom = ManifestSbom::new(&path, &manifest(&yaml)).expect("builds");
        let libfoo = sbom
            .document()
            .packages()
            .iter()
            .find(|p| p.name == "libfoo")
            .expect("libfoo");
        assert_eq!(libfoo.download_location, DownloadLocation::NoAssertion);
    }

    #[test]
    fn test_unknown_creator_is_fatal() {
        let yaml = BASE.replace("Tool: make-sbom", "Robot: R2");
        let (_dir, path) = artifact();
        let err = ManifestSbom::new(&path, &manifest(&yaml)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let err = ManifestSbom::new(Path::new("/nonexistent/image.swu"), &manifest(BASE)).unwrap_err();
        assert!(matches!(err, crate::error::SbomError::Io { .. }));
    }
}
