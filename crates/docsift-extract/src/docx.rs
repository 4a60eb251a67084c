//! Word (.docx) content adapter.

use docsift_core::{ExtractError, FormatAdapter, RawContent};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Main document part inside the OOXML container.
const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Adapter for Office Open XML word-processing documents.
///
/// Reads the whole `word/document.xml` part as one markup blob; paragraph
/// recovery happens in the normalizer.
pub struct DocxAdapter;

impl DocxAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for DocxAdapter {
    fn extensions(&self) -> &[&str] {
        &[".docx"]
    }

    fn container_metadata(&self) -> bool {
        true
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting docx: {}", path.display());
        let file = File::open(path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| ExtractError::Container(e.to_string()))?;

        let mut entry = archive
            .by_name(DOCUMENT_ENTRY)
            .map_err(|_| ExtractError::MissingEntry(DOCUMENT_ENTRY.to_string()))?;

        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(RawContent::Markup(xml))
    }
}
