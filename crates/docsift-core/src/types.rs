//! Core types for docsift.
//!
//! This module contains the shared data structures used across docsift:
//!
//! ## Inspection Results
//! - [`Document`]: The per-file inspection record (content + metadata + attributes)
//! - [`FileAttributes`]: Size and timestamps read from the file system
//!
//! ## Extraction
//! - [`RawContent`]: Raw adapter output prior to normalization
//! - [`CoreProperties`]: Decoded `docProps/core.xml` metadata fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Document Record
// ============================================================================

/// Inspection result for a single file.
///
/// Constructed per invocation and fully populated synchronously. Metadata
/// fields are present only for ZIP-container formats with a readable
/// `docProps/core.xml`; `title` falls back to the file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Path the file was inspected under
    pub path: PathBuf,
    /// Path relative to the scan root (equals `path` when no root was given)
    pub rel_path: PathBuf,
    /// Resolved file name
    pub filename: String,
    /// Document title; defaults to the file name
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Normalized plain-text content; empty when no adapter matched
    pub content: String,
    /// File size in bytes
    pub size: u64,
    /// Creation time (platform-dependent availability)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Last access time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessed: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a record for `path` with everything except identity left empty.
    #[must_use]
    pub fn new(path: &Path, rel_path: &Path) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            rel_path: rel_path.to_path_buf(),
            title: filename.clone(),
            filename,
            subject: None,
            creator: None,
            keywords: None,
            description: None,
            last_modified_by: None,
            revision: None,
            category: None,
            content: String::new(),
            size: 0,
            created: None,
            modified: None,
            accessed: None,
        }
    }

    /// Merge decoded core properties into the record.
    ///
    /// A non-empty metadata title replaces the file-name default; empty
    /// source fields stay absent.
    pub fn apply_properties(&mut self, props: CoreProperties) {
        if let Some(title) = props.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        self.subject = props.subject.filter(|v| !v.is_empty());
        self.creator = props.creator.filter(|v| !v.is_empty());
        self.keywords = props.keywords.filter(|v| !v.is_empty());
        self.description = props.description.filter(|v| !v.is_empty());
        self.last_modified_by = props.last_modified_by.filter(|v| !v.is_empty());
        self.revision = props.revision.filter(|v| !v.is_empty());
        self.category = props.category.filter(|v| !v.is_empty());
    }
}

// ============================================================================
// File Attributes
// ============================================================================

/// Size and timestamps read from file-system metadata.
///
/// Timestamp availability is platform-dependent; fields the OS does not
/// expose stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAttributes {
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
}

// ============================================================================
// Raw Adapter Output
// ============================================================================

/// Raw content produced by a format adapter, prior to normalization.
///
/// Each variant tells the normalizer which transforms apply: markup variants
/// get paragraph-boundary replacement, tag stripping and entity unescaping;
/// plain-fragment output from legacy binary decoders gets the
/// strange-character filter; `Plain` passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    /// Whole-document markup (.docx)
    Markup(String),
    /// One markup fragment per slide/section (.pptx)
    MarkupFragments(Vec<String>),
    /// Pre-split plain-text fragments: spreadsheet rows (.xlsx)
    PlainFragments(Vec<String>),
    /// Fragments decoded from a legacy binary format (.doc/.ppt/.xls);
    /// subject to the strange-character filter
    LegacyFragments(Vec<String>),
    /// Already-plain text (.pdf)
    Plain(String),
}

// ============================================================================
// Container Metadata
// ============================================================================

/// Fields of `docProps/core.xml` in an OOXML container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub revision: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub category: Option<String>,
}
