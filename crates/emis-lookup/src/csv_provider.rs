//! CSV-backed code lookup provider.
//!
//! The reference table is an analyst export of the code lookup query, one
//! header row plus one row per internal identifier. Opening a live database
//! connection is outside this system; the export stands in for it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use emis_model::{EMIS_CODE_ID_COLUMN, LookupRow, READ_CV2_COLUMN};

use crate::error::{LookupError, Result};
use crate::provider::CodeLookupProvider;

/// Provider reading lookup rows from a reference CSV file.
#[derive(Debug, Clone)]
pub struct CsvLookupProvider {
    path: PathBuf,
}

impl CsvLookupProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CodeLookupProvider for CsvLookupProvider {
    /// The query is fixed for this system, and the export already is its
    /// result set, so the argument is not interpreted.
    fn fetch_all(&self, _query: &str) -> Result<Vec<LookupRow>> {
        read_lookup_rows(&self.path)
    }
}

/// Read a reference CSV into lookup rows, preserving file order.
///
/// Handles BOM characters in the header and trims whitespace from values.
/// Missing cells become empty strings so callers never see absent columns.
pub fn read_lookup_rows(path: &Path) -> Result<Vec<LookupRow>> {
    if !path.is_file() {
        return Err(LookupError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| LookupError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LookupError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    for required in [EMIS_CODE_ID_COLUMN, READ_CV2_COLUMN] {
        if !headers.iter().any(|header| header == required) {
            return Err(LookupError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LookupError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut columns = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").trim().to_string();
            columns.insert(header.clone(), value);
        }
        rows.push(LookupRow::new(columns));
    }

    debug!(path = %path.display(), rows = rows.len(), "code lookup table loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_lookup(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CodeLookup.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_rows_in_file_order() {
        let (_dir, path) = write_lookup(
            "EmisCodeId,ReadCV2,SnomedConceptId\n237011,X123,126949007\n310551,Y456,\n",
        );
        let rows = read_lookup_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].emis_code_id(), Some(237011));
        assert_eq!(rows[0].read_cv2(), "X123");
        assert_eq!(rows[0].get("SnomedConceptId"), Some("126949007"));
        assert_eq!(rows[1].emis_code_id(), Some(310551));
        // Empty cells come back as empty strings, not as absent columns.
        assert_eq!(rows[1].get("SnomedConceptId"), Some(""));
    }

    #[test]
    fn tolerates_bom_and_padding() {
        let (_dir, path) = write_lookup("\u{feff}EmisCodeId,ReadCV2\n 237011 , X123 \n");
        let rows = read_lookup_rows(&path).unwrap();

        assert_eq!(rows[0].emis_code_id(), Some(237011));
        assert_eq!(rows[0].read_cv2(), "X123");
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let (_dir, path) = write_lookup("EmisCodeId,SnomedConceptId\n237011,126949007\n");
        let error = read_lookup_rows(&path).unwrap_err();
        assert!(matches!(
            error,
            LookupError::MissingColumn { column, .. } if column == READ_CV2_COLUMN
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let error = read_lookup_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(error, LookupError::FileNotFound { .. }));
    }
}
