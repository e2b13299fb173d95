//! Error types for code resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from resolving extracted records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A record's internal identifier is not an integer, which indicates
    /// malformed source data needing analyst attention.
    #[error(
        "code identifier `{code_system_id}` in template `{template_name}` ({path}) is not numeric",
        path = .source_path.display()
    )]
    NonNumericIdentifier {
        code_system_id: String,
        template_name: String,
        source_path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
