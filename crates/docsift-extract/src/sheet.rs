//! Spreadsheet (.xlsx/.xls) content adapters.
//!
//! Both formats go through calamine; the only difference is the workbook
//! reader and whether the output is subject to legacy strange-character
//! filtering.

use calamine::{open_workbook, Data, Range, Reader, Xls, Xlsx};
use docsift_core::{ExtractError, FormatAdapter, RawContent};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// One text fragment per row, cells joined with a tab, sheets in file order.
fn workbook_rows<R>(workbook: &mut R) -> Result<Vec<String>, ExtractError>
where
    R: Reader<BufReader<File>>,
    R::Error: std::fmt::Display,
{
    let mut rows = Vec::new();
    for sheet in workbook.sheet_names().to_owned() {
        let range: Range<Data> = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        for row in range.rows() {
            let text = row
                .iter()
                .map(Data::to_string)
                .collect::<Vec<_>>()
                .join("\t");
            rows.push(text);
        }
    }
    Ok(rows)
}

/// Adapter for Office Open XML workbooks.
pub struct XlsxAdapter;

impl XlsxAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for XlsxAdapter {
    fn extensions(&self) -> &[&str] {
        &[".xlsx"]
    }

    fn container_metadata(&self) -> bool {
        true
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting xlsx: {}", path.display());
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ExtractError::Container(e.to_string()))?;
        Ok(RawContent::PlainFragments(workbook_rows(&mut workbook)?))
    }
}

/// Adapter for legacy BIFF workbooks.
pub struct XlsAdapter;

impl XlsAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for XlsAdapter {
    fn extensions(&self) -> &[&str] {
        &[".xls"]
    }

    fn extract(&self, path: &Path) -> Result<RawContent, ExtractError> {
        debug!("extracting xls: {}", path.display());
        let mut workbook: Xls<BufReader<File>> = open_workbook(path)
            .map_err(|e: calamine::XlsError| ExtractError::Container(e.to_string()))?;
        Ok(RawContent::LegacyFragments(workbook_rows(&mut workbook)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_rejects_non_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = XlsxAdapter::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Container(_)));
    }

    #[test]
    fn test_xls_rejects_non_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.xls");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = XlsAdapter::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Container(_)));
    }

    #[test]
    fn test_extension_wiring() {
        assert_eq!(XlsxAdapter::new().extensions(), &[".xlsx"]);
        assert!(XlsxAdapter::new().container_metadata());
        assert_eq!(XlsAdapter::new().extensions(), &[".xls"]);
        assert!(!XlsAdapter::new().container_metadata());
    }
}
