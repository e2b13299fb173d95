use std::path::PathBuf;

/// Outcome of an audit run.
#[derive(Debug)]
pub struct AuditResult {
    pub report_path: PathBuf,
    pub files: Vec<FileSummary>,
    pub lookup_rows: usize,
    pub skipped_files: Vec<String>,
    pub has_errors: bool,
}

/// Per-template extraction and resolution counts.
#[derive(Debug)]
pub struct FileSummary {
    pub path: PathBuf,
    pub template_name: String,
    pub records: usize,
    pub unresolved: usize,
}
