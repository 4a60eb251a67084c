//! # docsift-extract
//!
//! Text and metadata extraction for office documents and PDFs.
//!
//! Extraction is a two-stage affair: a per-format adapter delegates the
//! structural parsing to an external library and returns raw content, then
//! the shared [`normalize`](normalize::normalize) pipeline flattens it into
//! plain text (paragraph-boundary recovery, tag stripping, entity
//! unescaping, strange-character removal for legacy formats).
//!
//! ## Supported Formats
//!
//! | Adapter | Extensions | Parser |
//! |---------|------------|--------|
//! | [`DocxAdapter`] | `.docx` | zip (`word/document.xml`) |
//! | [`PptxAdapter`] | `.pptx` | zip (one fragment per slide) |
//! | [`XlsxAdapter`] / [`XlsAdapter`] | `.xlsx` / `.xls` | calamine |
//! | [`DocAdapter`] / [`PptAdapter`] | `.doc` / `.ppt` | cfb (OLE streams) |
//! | [`PdfAdapter`] | `.pdf` | pdf-extract |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsift_extract::Inspector;
//! use std::path::Path;
//!
//! let inspector = Inspector::new();
//! let document = inspector.inspect(Path::new("report.docx"))?;
//! println!("{}: {} bytes of text", document.title, document.content.len());
//! ```
//!
//! Container formats additionally get their `docProps/core.xml` decoded
//! into the record's metadata fields; metadata failures are logged and do
//! not abort content extraction.

pub mod docx;
pub mod fileinfo;
pub mod inspector;
pub mod legacy;
pub mod metadata;
pub mod normalize;
pub mod pdf;
pub mod pptx;
pub mod sheet;

pub use docx::DocxAdapter;
pub use inspector::Inspector;
pub use legacy::{DocAdapter, PptAdapter};
pub use metadata::read_core_properties;
pub use pdf::PdfAdapter;
pub use pptx::PptxAdapter;
pub use sheet::{XlsAdapter, XlsxAdapter};
