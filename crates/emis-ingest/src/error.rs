//! Error types for template ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from discovery and extraction.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The templates directory does not exist or is not a directory.
    #[error("templates directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The templates directory could not be walked.
    #[error("failed to read templates directory {}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A template file could not be read as text.
    #[error("failed to read template file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template file is not recoverable as XML, even after repair.
    #[error("template file {} could not be parsed as XML", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A coded component lacks a field the template format requires.
    #[error("component in {} is missing required field `{field}`", .path.display())]
    MissingRequiredField { path: PathBuf, field: &'static str },
}

pub type Result<T> = std::result::Result<T, IngestError>;
