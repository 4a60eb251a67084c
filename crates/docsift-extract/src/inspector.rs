//! Format dispatch and the inspection entry point.

use docsift_core::{Document, FormatAdapter, InspectError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::docx::DocxAdapter;
use crate::fileinfo::read_attributes;
use crate::legacy::{DocAdapter, PptAdapter};
use crate::metadata::read_core_properties;
use crate::normalize::normalize;
use crate::pdf::PdfAdapter;
use crate::pptx::PptxAdapter;
use crate::sheet::{XlsAdapter, XlsxAdapter};

/// Extension-keyed registry of format adapters plus the inspection logic.
///
/// One document is processed start to finish by one call; the inspector
/// holds no mutable state and can be shared across threads by callers who
/// parallelize over files themselves.
pub struct Inspector {
    adapters: HashMap<String, Arc<dyn FormatAdapter>>,
}

impl Inspector {
    /// Registry with all built-in adapters.
    #[must_use]
    pub fn new() -> Self {
        let mut inspector = Self {
            adapters: HashMap::new(),
        };
        inspector.register(DocxAdapter::new());
        inspector.register(PptxAdapter::new());
        inspector.register(XlsxAdapter::new());
        inspector.register(PdfAdapter::new());
        inspector.register(DocAdapter::new());
        inspector.register(PptAdapter::new());
        inspector.register(XlsAdapter::new());
        inspector
    }

    /// Register an adapter for each extension it declares.
    pub fn register<A: FormatAdapter + 'static>(&mut self, adapter: A) {
        let adapter = Arc::new(adapter);
        for ext in adapter.extensions() {
            self.adapters.insert((*ext).to_string(), adapter.clone());
        }
    }

    /// Adapter for a path, by exact case-sensitive extension match.
    #[must_use]
    pub fn adapter_for(&self, path: &Path) -> Option<Arc<dyn FormatAdapter>> {
        let ext = path.extension()?.to_str()?;
        self.adapters.get(&format!(".{ext}")).cloned()
    }

    /// Inspect a single file.
    ///
    /// File attributes are read first and their failure aborts everything.
    /// For container formats, metadata extraction runs next; its failure is
    /// logged and ignored. Content extraction failure returns the partially
    /// built record inside the error.
    pub fn inspect(&self, path: &Path) -> Result<Document> {
        self.inspect_with_root(path, None)
    }

    /// Inspect a file, populating `rel_path` relative to `root`.
    pub fn inspect_with_root(&self, path: &Path, root: Option<&Path>) -> Result<Document> {
        let rel_path = root
            .and_then(|r| path.strip_prefix(r).ok())
            .unwrap_or(path);
        let mut document = Document::new(path, rel_path);

        let attrs = read_attributes(path).map_err(|source| InspectError::Attributes {
            path: path.to_path_buf(),
            source,
        })?;
        document.size = attrs.size;
        document.created = attrs.created;
        document.modified = attrs.modified;
        document.accessed = attrs.accessed;

        let Some(adapter) = self.adapter_for(path) else {
            // Unrecognized extension: attributes only, no error.
            return Ok(document);
        };

        if adapter.container_metadata() {
            match read_core_properties(path) {
                Ok(props) => document.apply_properties(props),
                Err(e) => warn!("metadata unavailable for {}: {e}", path.display()),
            }
        }

        match adapter.extract(path) {
            Ok(raw) => document.content = normalize(raw),
            Err(source) => {
                return Err(InspectError::Extraction {
                    path: path.to_path_buf(),
                    source,
                    document: Box::new(document),
                });
            }
        }

        info!("inspected {}", document.filename);
        Ok(document)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}
