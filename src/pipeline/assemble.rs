//! The assembly engine.
//!
//! Folds source contributions into the manifest's root document. Records are
//! appended in the order sources are merged, so the output is reproducible
//! for the same inputs. Every append goes through the document's checked
//! `add_*` methods.

use crate::error::{ErrorContext, Result, SbomError};
use crate::model::{Document, ExtractedLicensingInfo, File, Package, Relationship, SpdxId};
use crate::sources::{ManifestSbom, SbomSource, SourceContribution, StandaloneDocument};

/// Counts of what one merge added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub packages: usize,
    pub files: usize,
    pub relationships: usize,
    /// Relationships refused by the document (repeats, cycles, extra DESCRIBES)
    pub dropped_relationships: usize,
    /// Packages and files already present with identical content
    pub duplicates: usize,
}

/// Merges sources under the primary package of a manifest document.
#[derive(Debug, Clone)]
pub struct Assembler {
    document: Document,
    root: SpdxId,
}

impl Assembler {
    #[must_use]
    pub fn new(manifest: ManifestSbom) -> Self {
        let root = manifest.root().clone();
        Self {
            document: manifest.into_document(),
            root,
        }
    }

    /// Identifier every source is linked under
    #[must_use]
    pub fn root(&self) -> &SpdxId {
        &self.root
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Merge one source, logging what it added.
    pub fn merge_source(&mut self, source: &dyn SbomSource) -> Result<MergeStats> {
        let description = source.describe();
        let stats = self
            .merge(source.contribution())
            .with_context(|| format!("merging {description}"))?;
        tracing::info!(
            "Merged {}: {} packages, {} files, {} relationships",
            description,
            stats.packages,
            stats.files,
            stats.relationships
        );
        if stats.dropped_relationships > 0 {
            tracing::debug!(
                "{}: {} relationships dropped",
                description,
                stats.dropped_relationships
            );
        }
        Ok(stats)
    }

    /// Append a contribution and link its targets under the root.
    ///
    /// An element identifier that is already taken is fatal unless the
    /// existing element is identical, in which case the repeat is skipped.
    pub fn merge(&mut self, contribution: SourceContribution) -> Result<MergeStats> {
        let mut stats = MergeStats::default();

        for package in contribution.packages {
            if self.is_repeat_package(&package)? {
                stats.duplicates += 1;
                continue;
            }
            self.document.add_package(package)?;
            stats.packages += 1;
        }

        for file in contribution.files {
            if self.is_repeat_file(&file)? {
                stats.duplicates += 1;
                continue;
            }
            self.document.add_file(file)?;
            stats.files += 1;
        }

        for info in contribution.extracted_licensing_info {
            self.add_extracted_licensing_info(info)?;
        }

        let links: Vec<Relationship> = contribution
            .link_targets
            .into_iter()
            .map(|target| self.link(target))
            .collect();
        for relationship in contribution.relationships.into_iter().chain(links) {
            if self.document.add_relationship(relationship) {
                stats.relationships += 1;
            } else {
                stats.dropped_relationships += 1;
            }
        }

        Ok(stats)
    }

    /// The finished document, once every package that claims analyzed
    /// files accounts for them.
    pub fn finish(self) -> Result<Document> {
        self.document.check_files_analyzed()?;
        Ok(self.document)
    }

    fn link(&self, target: SpdxId) -> Relationship {
        if !self.document.contains_element(&target) {
            tracing::warn!(
                "{} is linked under {} but is not an element of the document",
                target,
                self.root
            );
        }
        Relationship::contains(self.root.clone(), target)
    }

    fn is_repeat_package(&self, package: &Package) -> Result<bool> {
        if !self.document.contains_element(&package.id) {
            return Ok(false);
        }
        match self.document.package(&package.id) {
            Some(existing) if existing == package => {
                tracing::debug!("Skipping repeated package {}", package.id);
                Ok(true)
            }
            _ => Err(SbomError::validation(format!(
                "duplicate SPDX identifier {} ({})",
                package.id, package.name
            ))),
        }
    }

    fn is_repeat_file(&self, file: &File) -> Result<bool> {
        if !self.document.contains_element(&file.id) {
            return Ok(false);
        }
        match self.document.file(&file.id) {
            Some(existing) if existing == file => {
                tracing::debug!("Skipping repeated file {}", file.id);
                Ok(true)
            }
            _ => Err(SbomError::validation(format!(
                "duplicate SPDX identifier {} ({})",
                file.id, file.name
            ))),
        }
    }

    fn add_extracted_licensing_info(&mut self, info: ExtractedLicensingInfo) -> Result<()> {
        let existing = self
            .document
            .extracted_licensing_info()
            .iter()
            .find(|e| e.license_id == info.license_id);
        match existing {
            None => {
                self.document.add_extracted_licensing_info(info);
                Ok(())
            }
            Some(e) if e.extracted_text == info.extracted_text => Ok(()),
            Some(_) => Err(SbomError::validation(format!(
                "conflicting definitions of {}",
                info.license_id
            ))),
        }
    }
}

/// Result of a run.
#[derive(Debug, Clone)]
pub enum AssemblyOutput {
    /// One document rooted at the manifest's artifact
    Merged(Document),
    /// No manifest: every source that can stand alone, unmerged
    PassThrough(Vec<StandaloneDocument>),
}

/// Assemble the output for a run.
///
/// With a manifest every source is merged under its primary package. Without
/// one, each source's own document is emitted as is; sources that need a
/// root (package lists) are skipped with a warning.
pub fn assemble(
    manifest: Option<ManifestSbom>,
    sources: &[Box<dyn SbomSource>],
) -> Result<AssemblyOutput> {
    tracing::info!("Building SBOM...");
    let Some(manifest) = manifest else {
        let documents = sources
            .iter()
            .filter_map(|source| {
                let standalone = source.standalone();
                if standalone.is_none() {
                    tracing::warn!(
                        "Ignoring {}: it needs an artifact (-i) to be attached to",
                        source.describe()
                    );
                }
                standalone
            })
            .collect();
        return Ok(AssemblyOutput::PassThrough(documents));
    };

    let mut assembler = Assembler::new(manifest);
    for source in sources {
        assembler.merge_source(source.as_ref())?;
    }
    Ok(AssemblyOutput::Merged(assembler.finish()?))
}
