//! Template file discovery.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{IngestError, Result};

/// Folders with this name hold retired template versions and are skipped.
const ARCHIVE_DIR_NAME: &str = "Archive";

/// Lists all template XML files under a directory, recursively.
///
/// `Archive` directories are pruned whole. Returns files in lexicographic
/// order so downstream output is deterministic.
pub fn list_template_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_archive_dir(entry));
    for entry_result in walker {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let is_xml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);

        if is_xml {
            files.push(path);
        }
    }

    Ok(files)
}

fn is_archive_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ARCHIVE_DIR_NAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["Asthma Review.xml", "Diabetes v1.2.xml", "notes.txt"] {
            fs::write(dir.path().join(name), "<x/>").unwrap();
        }

        let nested = dir.path().join("Respiratory");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("COPD.XML"), "<x/>").unwrap();

        let archive = dir.path().join("Archive");
        fs::create_dir(&archive).unwrap();
        fs::write(archive.join("Old Review.xml"), "<x/>").unwrap();

        dir
    }

    #[test]
    fn lists_xml_files_recursively() {
        let dir = create_test_dir();
        let files = list_template_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Asthma Review.xml", "Diabetes v1.2.xml", "COPD.XML"]);
    }

    #[test]
    fn skips_archive_directories() {
        let dir = create_test_dir();
        let files = list_template_files(dir.path()).unwrap();

        assert!(
            files
                .iter()
                .all(|p| !p.components().any(|c| c.as_os_str() == "Archive"))
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let error = list_template_files(&missing).unwrap_err();
        assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
    }
}
