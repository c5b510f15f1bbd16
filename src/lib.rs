//! **Assemble one SPDX Software Bill of Materials from several inventories.**
//!
//! `make-sbom` builds an SBOM for a release artifact (an update image, a root
//! file system tarball) by merging:
//!
//! - a hand-written YAML manifest describing the artifact itself,
//! - package-manager listings (`apk list --installed`, `dpkg-licenses -c`),
//! - the output of a content scanner run on directories or tarballs,
//! - SBOM documents produced elsewhere.
//!
//! Each input goes through an adapter in [`sources`] that returns a uniform
//! [`sources::SourceContribution`]; the [`pipeline`] folds those into one
//! [`model::Document`] while keeping identifiers unique, license fields
//! parseable and the relationship graph free of duplicates and containment
//! cycles.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the SPDX 2.2 document model and identifier assignment.
//! - **[`license`]**: maps license tokens from package metadata onto SPDX expressions.
//! - **[`sources`]**: the manifest, package-list, scan-result and external-document adapters.
//! - **[`pipeline`]**: the assembly engine and output writing.
//! - **[`codec`]**: SPDX JSON reading and writing.
//! - **[`scanner`]**: the content scanner collaborator (`syft`).
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use make_sbom::pipeline::{assemble, write_output, AssemblyOutput};
//! use make_sbom::sources::{ManifestSbom, PackagesSbom, SbomSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = ManifestSbom::from_paths(Path::new("image.swu"), Path::new("config.yaml"))?;
//!     let packages = PackagesSbom::from_path(Path::new("package_list.txt"))?;
//!     let sources: Vec<Box<dyn SbomSource>> = vec![Box::new(packages)];
//!
//!     if let AssemblyOutput::Merged(document) = assemble(Some(manifest), &sources)? {
//!         write_output(&document, Path::new("image.swu.spdx.json"))?;
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod license;
pub mod model;
pub mod pipeline;
pub mod scanner;
pub mod sources;
pub mod utils;

// Re-export main types for convenience
pub use codec::{parse_document, write_document, DocumentCodec, SpdxJsonCodec};
pub use config::{AssembleConfig, ConfigError, ManifestConfig, Validatable};
pub use error::{ErrorContext, Result, SbomError};
pub use license::{normalize, LicenseTokens};
pub use model::{Document, LicenseValue, Package, Relationship, RelationshipType, SpdxId};
pub use pipeline::{assemble, Assembler, AssemblyOutput};
pub use scanner::{ContentScanner, SyftScanner};
pub use sources::{
    ExternalSbom, ManifestSbom, PackagesSbom, SbomSource, ScanSbom, SourceContribution,
};
