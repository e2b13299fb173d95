//! Error types for lookup providers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from fetching the code lookup reference table.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The reference file does not exist.
    #[error("code lookup file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The reference file could not be read as CSV.
    #[error("failed to read code lookup file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The reference table lacks a column the resolver depends on.
    #[error("code lookup file {} is missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

pub type Result<T> = std::result::Result<T, LookupError>;
