//! SPDX document serialization.
//!
//! The [`DocumentCodec`] trait reads and writes [`Document`]s. The only
//! implementation is [`SpdxJsonCodec`] (SPDX 2.2 JSON), the format the
//! content scanner emits and the format embedded SBOMs are expected in.

mod json;

use crate::error::{ErrorContext, ParseErrorKind, Result, SbomError};
use crate::model::Document;
use std::path::Path;

/// Trait for SPDX document formats
pub trait DocumentCodec {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<Document> {
        let content = std::fs::read_to_string(path).map_err(|e| SbomError::io(path, e))?;
        self.parse_str(&content)
            .with_context(|| format!("parsing {} as {}", path.display(), self.format_name()))
    }

    /// Parse a document from string content
    fn parse_str(&self, content: &str) -> Result<Document>;

    /// Serialize a document
    fn to_string(&self, document: &Document) -> Result<String>;

    /// Serialize a document to a file, replacing it if it exists
    fn write(&self, document: &Document, path: &Path) -> Result<()> {
        let content = self.to_string(document)?;
        std::fs::write(path, content).map_err(|e| SbomError::io(path, e))
    }

    /// Get format name
    fn format_name(&self) -> &str;

    /// Quick structural check without a full parse
    fn can_parse(&self, content: &str) -> bool;
}

/// SPDX 2.2 JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxJsonCodec;

impl SpdxJsonCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentCodec for SpdxJsonCodec {
    fn parse_str(&self, content: &str) -> Result<Document> {
        if !self.can_parse(content) {
            return Err(SbomError::parse(
                "document format",
                ParseErrorKind::UnknownFormat,
            ));
        }
        let raw: json::SpdxDocument = serde_json::from_str(content)?;
        raw.into_document()
    }

    fn to_string(&self, document: &Document) -> Result<String> {
        let raw = json::SpdxDocument::from_document(document);
        let mut text = serde_json::to_string_pretty(&raw)?;
        text.push('\n');
        Ok(text)
    }

    fn format_name(&self) -> &str {
        "SPDX JSON"
    }

    fn can_parse(&self, content: &str) -> bool {
        content.trim_start().starts_with('{') && content.contains("\"spdxVersion\"")
    }
}

/// Read an SPDX JSON document from disk
pub fn parse_document(path: &Path) -> Result<Document> {
    SpdxJsonCodec::new().parse(path)
}

/// Parse an SPDX JSON document from a string
pub fn parse_document_str(content: &str) -> Result<Document> {
    SpdxJsonCodec::new().parse_str(content)
}

/// Write a document as SPDX JSON
pub fn write_document(document: &Document, path: &Path) -> Result<()> {
    SpdxJsonCodec::new().write(document, path)
}
