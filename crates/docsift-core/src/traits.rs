//! The adapter seam between the dispatcher and format-specific parsers.

use std::path::Path;

use crate::error::ExtractError;
use crate::types::RawContent;

/// Trait for per-format content adapters.
///
/// An adapter converts a file path into [`RawContent`] by delegating to an
/// external parsing library. It performs no normalization; the dispatcher
/// runs the shared pipeline on its output. Extraction is synchronous: one
/// call handles one document start to finish, and any handles the adapter
/// opens are released before it returns.
pub trait FormatAdapter: Send + Sync {
    /// File extensions this adapter handles, with the leading dot.
    ///
    /// Matching is exact and case-sensitive.
    fn extensions(&self) -> &[&str];

    /// Whether the format is a ZIP container exposing `docProps/core.xml`.
    fn container_metadata(&self) -> bool {
        false
    }

    /// Obtain raw content for the file at `path`.
    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError>;
}
