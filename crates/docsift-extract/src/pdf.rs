//! PDF content adapter.
//!
//! Whole-document text extraction via pdf-extract. Known limitation
//! inherited from the decoder: content on certain malformed pages is
//! silently skipped.

use docsift_core::{ExtractError, FormatAdapter, RawContent};
use std::path::Path;
use tracing::debug;

/// Adapter for PDF files.
pub struct PdfAdapter;

impl PdfAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for PdfAdapter {
    fn extensions(&self) -> &[&str] {
        &[".pdf"]
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting pdf: {}", path.display());
        let text =
            pdf_extract::extract_text(path).map_err(|e| ExtractError::Parse(e.to_string()))?;
        Ok(RawContent::Plain(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rejects_non_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.pdf");
        std::fs::write(&path, b"plainly not a pdf").unwrap();

        let err = PdfAdapter::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_extension_wiring() {
        let adapter = PdfAdapter::new();
        assert_eq!(adapter.extensions(), &[".pdf"]);
        assert!(!adapter.container_metadata());
    }
}
