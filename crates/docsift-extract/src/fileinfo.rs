//! File-attribute reader.
//!
//! Size and timestamps come from `std::fs::Metadata`, which already
//! normalizes the platform differences. Fields the OS does not expose
//! (commonly `created` on older Unix filesystems) stay `None` rather than
//! borrowing another timestamp's value.

use chrono::{DateTime, Utc};
use docsift_core::FileAttributes;
use std::path::Path;
use std::time::SystemTime;

fn to_utc(time: std::io::Result<SystemTime>) -> Option<DateTime<Utc>> {
    time.ok().map(DateTime::<Utc>::from)
}

/// Read size and best-effort timestamps for `path`.
///
/// # Errors
///
/// Fails when the file is missing or unreadable; inspection aborts on this
/// before any extraction is attempted.
pub fn read_attributes(path: &Path) -> std::io::Result<FileAttributes> {
    let meta = std::fs::metadata(path)?;
    Ok(FileAttributes {
        size: meta.len(),
        created: to_utc(meta.created()),
        modified: to_utc(meta.modified()),
        accessed: to_utc(meta.accessed()),
    })
}
