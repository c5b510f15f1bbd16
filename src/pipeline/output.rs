//! Output naming and writing.

use crate::codec::write_document;
use crate::error::Result;
use crate::model::Document;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix every output file carries
pub const OUTPUT_SUFFIX: &str = ".spdx.json";

/// Where a document is written.
///
/// `requested` (the `-o` value) wins and gets [`OUTPUT_SUFFIX`] appended
/// when it lacks it; otherwise the suffix is appended to `fallback`.
#[must_use]
pub fn output_path(requested: Option<&Path>, fallback: &Path) -> PathBuf {
    match requested {
        Some(path) if path.to_string_lossy().ends_with(OUTPUT_SUFFIX) => path.to_path_buf(),
        Some(path) => with_suffix(path),
        None => with_suffix(fallback),
    }
}

fn with_suffix(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Write a document and log its name.
pub fn write_output(document: &Document, path: &Path) -> Result<()> {
    write_document(document, path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::info!("created {}", name);
    Ok(())
}
