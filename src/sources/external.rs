//! External-document adapter: embeds an SBOM produced elsewhere.

use super::scan::remove_files;
use super::{SbomSource, SourceContribution, StandaloneDocument};
use crate::codec::parse_document;
use crate::error::Result;
use crate::model::{Document, DocumentParts, SpdxId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// An SPDX document to embed as a sub-graph.
#[derive(Debug, Clone)]
pub struct ExternalSbom {
    document: Document,
    origin: PathBuf,
}

impl ExternalSbom {
    /// Read the document. A malformed document is fatal.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(parse_document(path)?, path))
    }

    #[must_use]
    pub fn new(document: Document, origin: &Path) -> Self {
        Self {
            document,
            origin: origin.to_path_buf(),
        }
    }

    /// Element the importing root links to.
    ///
    /// The element the embedded document describes, or the identifier derived
    /// from the document name when it describes nothing.
    #[must_use]
    pub fn sub_root(&self) -> SpdxId {
        self.document
            .described_elements()
            .next()
            .cloned()
            .unwrap_or_else(|| SpdxId::deterministic(self.document.name()))
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Scanner placeholders (all-zero checksums) never reach the merged document.
    fn remove_placeholder_files(&self, parts: &mut DocumentParts) {
        let placeholders: HashSet<SpdxId> = parts
            .files
            .iter()
            .filter(|f| f.is_placeholder())
            .map(|f| f.id.clone())
            .collect();
        if !placeholders.is_empty() {
            tracing::warn!(
                "{}: dropping {} files with all-zero checksums",
                self.origin.display(),
                placeholders.len()
            );
            remove_files(parts, &placeholders);
        }
    }
}

impl SbomSource for ExternalSbom {
    fn describe(&self) -> String {
        format!("external SBOM {}", self.origin.display())
    }

    fn contribution(&self) -> SourceContribution {
        let sub_root = self.sub_root();
        let mut parts = self.document.clone().into_parts();
        self.remove_placeholder_files(&mut parts);
        let mut contribution = SourceContribution::from_embedded(parts);
        for package in &mut contribution.packages {
            package.file_name = None;
        }
        contribution.link_targets.push(sub_root);
        contribution
    }

    fn standalone(&self) -> Option<StandaloneDocument> {
        Some(StandaloneDocument {
            document: self.document.clone(),
            origin: self.origin.clone(),
        })
    }
}
