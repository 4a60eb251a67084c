//! PowerPoint (.pptx) content adapter.

use docsift_core::{ExtractError, FormatAdapter, RawContent};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Adapter for Office Open XML presentations.
///
/// Produces one markup fragment per `ppt/slides/slideN.xml` entry, ordered
/// by slide number.
pub struct PptxAdapter;

impl PptxAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PptxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Slide number for entries of the form `ppt/slides/slideN.xml`.
fn slide_number(entry_name: &str) -> Option<usize> {
    let rest = entry_name.strip_prefix("ppt/slides/slide")?;
    let digits = rest.strip_suffix(".xml")?;
    digits.parse().ok()
}

impl FormatAdapter for PptxAdapter {
    fn extensions(&self) -> &[&str] {
        &[".pptx"]
    }

    fn container_metadata(&self) -> bool {
        true
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting pptx: {}", path.display());
        let file = File::open(path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| ExtractError::Container(e.to_string()))?;

        let mut slide_names: Vec<(usize, String)> = archive
            .file_names()
            .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
            .collect();
        slide_names.sort_by_key(|(n, _)| *n);

        let mut fragments = Vec::with_capacity(slide_names.len());
        for (_, name) in slide_names {
            let mut entry = archive.by_name(&name).map_err(|_| {
                ExtractError::MissingEntry(name.clone())
            })?;
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            fragments.push(xml);
        }
        Ok(RawContent::MarkupFragments(fragments))
    }
}
