//! Error types for docsift.

use crate::types::Document;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a format adapter while obtaining raw content.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid container: {0}")]
    Container(String),

    #[error("missing entry: {0}")]
    MissingEntry(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading `docProps/core.xml` from a container.
///
/// Metadata failures are non-fatal to an inspection; the dispatcher logs
/// them and continues with content extraction.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("not a valid zip container: {0}")]
    NotZip(String),

    #[error("failed to read {entry}: {reason}")]
    Entry { entry: String, reason: String },

    #[error("malformed core.xml: {0}")]
    Xml(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level inspection error.
#[derive(Error, Debug)]
pub enum InspectError {
    /// File-attribute read failed; nothing else was attempted.
    #[error("failed to read attributes of {path}: {source}")]
    Attributes {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content extraction failed. The record built so far (identity, file
    /// attributes, any container metadata) rides along with the error.
    #[error("content extraction failed for {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractError,
        document: Box<Document>,
    },
}

impl InspectError {
    /// The partially built record, if inspection got far enough to have one.
    #[must_use]
    pub fn partial_document(&self) -> Option<&Document> {
        match self {
            Self::Extraction { document, .. } => Some(document),
            Self::Attributes { .. } => None,
        }
    }
}

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_extract_error_container_display() {
        let err = ExtractError::Container("bad zip header".to_string());
        assert_eq!(err.to_string(), "invalid container: bad zip header");
    }

    #[test]
    fn test_extract_error_missing_entry_display() {
        let err = ExtractError::MissingEntry("word/document.xml".to_string());
        assert_eq!(err.to_string(), "missing entry: word/document.xml");
    }

    #[test]
    fn test_extract_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ExtractError = io_err.into();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn test_metadata_error_not_zip_display() {
        let err = MetadataError::NotZip("invalid signature".to_string());
        assert_eq!(
            err.to_string(),
            "not a valid zip container: invalid signature"
        );
    }

    #[test]
    fn test_metadata_error_entry_display() {
        let err = MetadataError::Entry {
            entry: "docProps/core.xml".to_string(),
            reason: "truncated".to_string(),
        };
        assert_eq!(err.to_string(), "failed to read docProps/core.xml: truncated");
    }

    #[test]
    fn test_inspect_error_attributes_has_no_partial() {
        let err = InspectError::Attributes {
            path: PathBuf::from("/missing.docx"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.partial_document().is_none());
        assert!(err.to_string().contains("/missing.docx"));
    }

    #[test]
    fn test_inspect_error_extraction_carries_partial() {
        let doc = Document::new(Path::new("bad.docx"), Path::new("bad.docx"));
        let err = InspectError::Extraction {
            path: PathBuf::from("bad.docx"),
            source: ExtractError::Container("not a zip".to_string()),
            document: Box::new(doc),
        };
        let partial = err.partial_document().unwrap();
        assert_eq!(partial.filename, "bad.docx");
        assert!(err.to_string().contains("not a zip"));
    }
}
