//! Content scanner collaborator.
//!
//! A scanner turns a file system path (directory, tarball, image) into a raw
//! SPDX document. The assembler treats it as a black box; [`SyftScanner`]
//! runs `syft` as a subprocess.

use crate::codec::parse_document_str;
use crate::error::{ErrorContext, Result, SbomError, ScanErrorKind};
use crate::model::Document;
use std::path::Path;
use std::process::Command;

/// Default scanner program
pub const DEFAULT_SCANNER: &str = "syft";

/// Output format requested from the scanner
const SCANNER_FORMAT: &str = "spdx-json@2.2";

/// Produces a raw SPDX document for a scan target.
pub trait ContentScanner {
    /// Scan `target`. Any failure aborts the run.
    fn scan(&self, target: &Path) -> Result<Document>;
}

/// Runs `<program> -o spdx-json@2.2 <target>` and parses its stdout.
#[derive(Debug, Clone)]
pub struct SyftScanner {
    program: String,
}

impl SyftScanner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for SyftScanner {
    fn default() -> Self {
        Self::new(DEFAULT_SCANNER)
    }
}

impl ContentScanner for SyftScanner {
    fn scan(&self, target: &Path) -> Result<Document> {
        let context = format!("scanning {}", target.display());
        tracing::info!("Scanning {} with {}...", target.display(), self.program);

        let output = Command::new(&self.program)
            .args(["-o", SCANNER_FORMAT])
            .arg(target)
            .output()
            .map_err(|e| {
                SbomError::scan(
                    context.clone(),
                    ScanErrorKind::Spawn {
                        program: self.program.clone(),
                        message: e.to_string(),
                    },
                )
            })?;

        if !output.status.success() {
            return Err(SbomError::scan(
                context,
                ScanErrorKind::Failed {
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                },
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_document_str(&stdout).context(context)
    }
}
