//! # docsift-core
//!
//! Core types and traits for the docsift document inspection pipeline.
//!
//! This crate provides the foundational abstractions used throughout docsift:
//!
//! - **Inspection record**: [`Document`] aggregates content, container
//!   metadata and file attributes for a single file
//! - **Adapter seam**: [`FormatAdapter`] trait implemented once per file
//!   format
//! - **Raw output**: [`RawContent`] carries adapter output into the shared
//!   text normalizer
//! - **Errors**: [`ExtractError`], [`MetadataError`] and [`InspectError`]
//!   separate the two failure channels (content is fatal, metadata is not)
//!
//! ## Related Crates
//!
//! - `docsift-extract`: normalizer, adapters and the `Inspector` entry point
//! - `docsift`: command-line interface

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExtractError, InspectError, MetadataError, Result};
pub use traits::FormatAdapter;
pub use types::{CoreProperties, Document, FileAttributes, RawContent};
