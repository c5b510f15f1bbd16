//! Assemble command handler.
//!
//! Reads the manifest and every source named on the command line, assembles
//! them and writes the resulting documents.

use crate::config::{AssembleConfig, Validatable};
use crate::error::Result;
use crate::pipeline::{assemble, output_path, write_output, AssemblyOutput};
use crate::scanner::{ContentScanner, SyftScanner};
use crate::sources::{ExternalSbom, ManifestSbom, PackagesSbom, SbomSource, ScanSbom};
use std::path::PathBuf;

/// Run with the configured scanner program. Returns the written paths.
pub fn run_assemble(config: &AssembleConfig) -> Result<Vec<PathBuf>> {
    let scanner = SyftScanner::new(config.scanner.program.as_str());
    run_assemble_with(config, &scanner)
}

/// Run with an explicit content scanner.
pub fn run_assemble_with(
    config: &AssembleConfig,
    scanner: &dyn ContentScanner,
) -> Result<Vec<PathBuf>> {
    config.ensure_valid()?;

    let manifest = config
        .input
        .as_deref()
        .map(|artifact| ManifestSbom::from_paths(artifact, &config.manifest))
        .transpose()?;

    let mut sources: Vec<Box<dyn SbomSource>> = Vec::new();
    if let Some(ref package_list) = config.package_list {
        tracing::info!("package information is created from package list");
        sources.push(Box::new(PackagesSbom::from_path(package_list)?));
    }
    for path in &config.external_sboms {
        sources.push(Box::new(ExternalSbom::from_path(path)?));
    }
    for target in &config.scan_targets {
        sources.push(Box::new(ScanSbom::scan(scanner, target)?));
    }

    match assemble(manifest, &sources)? {
        AssemblyOutput::Merged(document) => {
            let fallback = config.input.clone().unwrap_or_default();
            let path = output_path(config.output.as_deref(), &fallback);
            write_output(&document, &path)?;
            Ok(vec![path])
        }
        AssemblyOutput::PassThrough(documents) => {
            let requested = if documents.len() == 1 {
                config.output.as_deref()
            } else {
                if config.output.is_some() {
                    tracing::warn!(
                        "-o is ignored: {} documents are written separately",
                        documents.len()
                    );
                }
                None
            };
            documents
                .iter()
                .map(|standalone| -> Result<PathBuf> {
                    let path = output_path(requested, &standalone.origin);
                    write_output(&standalone.document, &path)?;
                    Ok(path)
                })
                .collect()
        }
    }
}
