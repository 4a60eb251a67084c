//! # docsift CLI
//!
//! Command-line interface for inspecting office documents and PDFs.
//!
//! ## Commands
//!
//! - `docsift inspect <FILES>...` - Extract text and metadata from files
//! - `docsift scan <DIR>` - Inspect every supported file under a directory
//!
//! ## Examples
//!
//! ```bash
//! # Inspect a single document
//! docsift inspect report.docx
//!
//! # JSON output for downstream indexing
//! docsift inspect report.docx --format json
//!
//! # Walk a directory tree
//! docsift scan ~/Documents --format json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsift_core::Document;
use docsift_extract::Inspector;
use std::path::{Path, PathBuf};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Extract plain text and metadata from office documents and PDFs")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect one or more files
    Inspect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Inspect every supported file under a directory
    Scan {
        /// Directory to walk
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let inspector = Inspector::new();
    match cli.command {
        Commands::Inspect { files } => {
            let mut failures = 0usize;
            for file in &files {
                match inspector.inspect(file) {
                    Ok(doc) => print_document(&doc, cli.format)?,
                    Err(e) => {
                        warn!("{e}");
                        eprintln!("error: {e}");
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!("{failures} of {} files failed", files.len());
            }
            Ok(())
        }
        Commands::Scan { dir } => scan(&inspector, &dir, cli.format),
    }
}

/// Extensions the dispatcher recognizes; everything else is skipped during
/// a scan instead of producing attribute-only records.
const SCAN_EXTENSIONS: &[&str] = &[".docx", ".pptx", ".xlsx", ".pdf", ".doc", ".ppt", ".xls"];

fn scan(inspector: &Inspector, root: &Path, format: OutputFormat) -> Result<()> {
    let mut failures = 0usize;
    let mut total = 0usize;
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SCAN_EXTENSIONS.contains(&format!(".{e}").as_str()));
        if !recognized {
            continue;
        }
        total += 1;
        match inspector.inspect_with_root(path, Some(root)) {
            Ok(doc) => print_document(&doc, format)?,
            Err(e) => {
                warn!("{e}");
                eprintln!("error: {e}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {total} files failed");
    }
    Ok(())
}

fn print_document(doc: &Document, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(doc)?);
        }
        OutputFormat::Text => {
            println!("=== {} ({} bytes)", doc.rel_path.display(), doc.size);
            if doc.title != doc.filename {
                println!("title: {}", doc.title);
            }
            if let Some(creator) = &doc.creator {
                println!("creator: {creator}");
            }
            if let Some(modified) = &doc.modified {
                println!("modified: {modified}");
            }
            if !doc.content.is_empty() {
                println!("{}", doc.content);
            }
        }
    }
    Ok(())
}
