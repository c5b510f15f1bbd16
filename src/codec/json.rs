//! SPDX 2.2 JSON schema and conversion to and from the [`Document`] model.

use crate::error::{Result, SbomError};
use crate::model::{
    Checksum, ChecksumAlgorithm, CreationInfo, Creator, Document, DocumentParts,
    DownloadLocation, Extensions, ExtractedLicensingInfo, File, LicenseValue, Package,
    Relationship, RelationshipType, SpdxId, TextValue, VerificationCode, NOASSERTION,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SpdxDocument {
    spdx_version: String,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    data_license: String,
    document_namespace: String,
    creation_info: SpdxCreationInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    packages: Vec<SpdxPackage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    files: Vec<SpdxFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<SpdxRelationship>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    has_extracted_licensing_infos: Vec<SpdxExtractedLicensingInfo>,
    #[serde(default, skip_serializing)]
    document_describes: Vec<String>,
    #[serde(flatten)]
    extra: Extensions,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo {
    created: String,
    creators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license_list_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_file_name: Option<String>,
    #[serde(default = "no_assertion")]
    download_location: String,
    #[serde(default = "files_analyzed_default")]
    files_analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_verification_code: Option<SpdxVerificationCode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    checksums: Vec<SpdxChecksum>,
    #[serde(default = "no_assertion")]
    license_concluded: String,
    #[serde(default = "no_assertion")]
    license_declared: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license_info_from_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license_comments: Option<String>,
    #[serde(default = "no_assertion")]
    copyright_text: String,
    #[serde(flatten)]
    extra: Extensions,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxVerificationCode {
    package_verification_code_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    package_verification_code_excluded_files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxChecksum {
    algorithm: String,
    checksum_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxFile {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    file_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    checksums: Vec<SpdxChecksum>,
    #[serde(default = "no_assertion")]
    license_concluded: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    license_info_in_files: Vec<String>,
    #[serde(default = "no_assertion")]
    copyright_text: String,
    #[serde(flatten)]
    extra: Extensions,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship {
    spdx_element_id: String,
    relationship_type: String,
    related_spdx_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExtractedLicensingInfo {
    license_id: String,
    extracted_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    see_alsos: Vec<String>,
}

fn no_assertion() -> String {
    NOASSERTION.to_string()
}

const fn files_analyzed_default() -> bool {
    true
}

// ============================================================================
// JSON -> model
// ============================================================================

impl SpdxDocument {
    pub(super) fn into_document(self) -> Result<Document> {
        let created = DateTime::parse_from_rfc3339(&self.creation_info.created)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| SbomError::invalid_value("creationInfo.created", e.to_string()))?;

        let creators = self
            .creation_info
            .creators
            .iter()
            .map(|text| {
                Creator::parse(text).ok_or_else(|| {
                    SbomError::invalid_value("creationInfo.creators", format!("unknown creator '{text}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let packages = self
            .packages
            .into_iter()
            .map(SpdxPackage::into_package)
            .collect::<Result<Vec<_>>>()?;
        let files = self
            .files
            .into_iter()
            .map(SpdxFile::into_file)
            .collect::<Result<Vec<_>>>()?;

        let document_id = SpdxId::new(self.spdx_id);
        let mut relationships: Vec<Relationship> = self
            .relationships
            .into_iter()
            .map(SpdxRelationship::into_relationship)
            .collect();
        // documentDescribes is shorthand for DESCRIBES relationships
        for described in self.document_describes {
            let rel = Relationship::new(
                document_id.clone(),
                RelationshipType::Describes,
                SpdxId::new(described),
            );
            if !relationships.contains(&rel) {
                relationships.push(rel);
            }
        }

        let extracted_licensing_info = self
            .has_extracted_licensing_infos
            .into_iter()
            .map(|info| ExtractedLicensingInfo {
                license_id: info.license_id,
                extracted_text: info.extracted_text,
                name: info.name,
                comment: info.comment,
                cross_refs: info.see_alsos,
            })
            .collect();

        Ok(Document::from_parts(DocumentParts {
            id: document_id,
            creation_info: CreationInfo {
                spdx_version: self.spdx_version,
                name: self.name,
                namespace: self.document_namespace,
                creators,
                created,
                data_license: self.data_license,
                license_list_version: self.creation_info.license_list_version,
                comment: self.creation_info.comment,
            },
            packages,
            files,
            relationships,
            extracted_licensing_info,
            extensions: self.extra,
        }))
    }
}

fn license_field(field: &str, text: &str) -> Result<LicenseValue> {
    LicenseValue::from_document_field(text)
        .map_err(|e| SbomError::invalid_value(field, e.to_string()))
}

fn license_list(field: &str, texts: &[String]) -> Result<Vec<LicenseValue>> {
    texts.iter().map(|text| license_field(field, text)).collect()
}

impl SpdxChecksum {
    fn into_checksum(self) -> Checksum {
        Checksum::new(
            ChecksumAlgorithm::from_spdx(&self.algorithm),
            self.checksum_value,
        )
    }

    fn from_checksum(checksum: &Checksum) -> Self {
        Self {
            algorithm: checksum.algorithm.to_string(),
            checksum_value: checksum.value.clone(),
        }
    }
}

impl SpdxPackage {
    fn into_package(self) -> Result<Package> {
        let license_concluded = license_field("licenseConcluded", &self.license_concluded)?;
        let license_declared = license_field("licenseDeclared", &self.license_declared)?;
        let license_info_from_files = self
            .license_info_from_files
            .as_deref()
            .map(|texts| license_list("licenseInfoFromFiles", texts))
            .transpose()?;

        Ok(Package {
            id: SpdxId::new(self.spdx_id),
            name: self.name,
            version: self.version_info,
            file_name: self.package_file_name,
            download_location: DownloadLocation::from_field(&self.download_location),
            files_analyzed: self.files_analyzed,
            verification_code: self.package_verification_code.map(|code| VerificationCode {
                value: code.package_verification_code_value,
                excluded_files: code.package_verification_code_excluded_files,
            }),
            checksums: self
                .checksums
                .into_iter()
                .map(SpdxChecksum::into_checksum)
                .collect(),
            license_concluded,
            license_declared,
            license_info_from_files,
            license_comment: self.license_comments,
            copyright_text: TextValue::from_field(&self.copyright_text),
            extensions: self.extra,
        })
    }

    fn from_package(package: &Package) -> Self {
        Self {
            spdx_id: package.id.to_string(),
            name: package.name.clone(),
            version_info: package.version.clone(),
            package_file_name: package.file_name.clone(),
            download_location: package.download_location.to_string(),
            files_analyzed: package.files_analyzed,
            package_verification_code: package.verification_code.as_ref().map(|code| {
                SpdxVerificationCode {
                    package_verification_code_value: code.value.clone(),
                    package_verification_code_excluded_files: code.excluded_files.clone(),
                }
            }),
            checksums: package
                .checksums
                .iter()
                .map(SpdxChecksum::from_checksum)
                .collect(),
            license_concluded: package.license_concluded.to_string(),
            license_declared: package.license_declared.to_string(),
            license_info_from_files: package
                .license_info_from_files
                .as_ref()
                .map(|values| values.iter().map(ToString::to_string).collect()),
            license_comments: package.license_comment.clone(),
            copyright_text: package.copyright_text.to_string(),
            extra: package.extensions.clone(),
        }
    }
}

impl SpdxFile {
    fn into_file(self) -> Result<File> {
        Ok(File {
            id: SpdxId::new(self.spdx_id),
            name: self.file_name,
            checksums: self
                .checksums
                .into_iter()
                .map(SpdxChecksum::into_checksum)
                .collect(),
            license_concluded: license_field("licenseConcluded", &self.license_concluded)?,
            license_info_in_file: license_list("licenseInfoInFiles", &self.license_info_in_files)?,
            copyright_text: TextValue::from_field(&self.copyright_text),
            extensions: self.extra,
        })
    }

    fn from_file(file: &File) -> Self {
        Self {
            spdx_id: file.id.to_string(),
            file_name: file.name.clone(),
            checksums: file.checksums.iter().map(SpdxChecksum::from_checksum).collect(),
            license_concluded: file.license_concluded.to_string(),
            license_info_in_files: file
                .license_info_in_file
                .iter()
                .map(ToString::to_string)
                .collect(),
            copyright_text: file.copyright_text.to_string(),
            extra: file.extensions.clone(),
        }
    }
}

impl SpdxRelationship {
    fn into_relationship(self) -> Relationship {
        Relationship {
            element: SpdxId::new(self.spdx_element_id),
            kind: RelationshipType::from_spdx(&self.relationship_type),
            related: SpdxId::new(self.related_spdx_element),
            comment: self.comment,
        }
    }

    fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            spdx_element_id: relationship.element.to_string(),
            relationship_type: relationship.kind.to_string(),
            related_spdx_element: relationship.related.to_string(),
            comment: relationship.comment.clone(),
        }
    }
}

// ============================================================================
// model -> JSON
// ============================================================================

impl SpdxDocument {
    pub(super) fn from_document(document: &Document) -> Self {
        let info = document.creation_info();
        Self {
            spdx_version: info.spdx_version.clone(),
            spdx_id: document.id().to_string(),
            name: info.name.clone(),
            data_license: info.data_license.clone(),
            document_namespace: info.namespace.clone(),
            creation_info: SpdxCreationInfo {
                created: info.created.format(CREATED_FORMAT).to_string(),
                creators: info.creators.iter().map(ToString::to_string).collect(),
                license_list_version: info.license_list_version.clone(),
                comment: info.comment.clone(),
            },
            packages: document
                .packages()
                .iter()
                .map(SpdxPackage::from_package)
                .collect(),
            files: document.files().iter().map(SpdxFile::from_file).collect(),
            relationships: document
                .relationships()
                .iter()
                .map(SpdxRelationship::from_relationship)
                .collect(),
            has_extracted_licensing_infos: document
                .extracted_licensing_info()
                .iter()
                .map(|info| SpdxExtractedLicensingInfo {
                    license_id: info.license_id.clone(),
                    extracted_text: info.extracted_text.clone(),
                    name: info.name.clone(),
                    comment: info.comment.clone(),
                    see_alsos: info.cross_refs.clone(),
                })
                .collect(),
            document_describes: Vec::new(),
            extra: document.extensions().clone(),
        }
    }
}
