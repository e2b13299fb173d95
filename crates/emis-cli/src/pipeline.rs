//! Audit pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Extract**: Discover template files and extract coded components
//! 2. **Lookup**: Fetch the code lookup reference table, once
//! 3. **Resolve**: Join every record against the lookup rows
//! 4. **Report**: Project and write the CSV artifact
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Files are processed strictly one at a time, in discovery order,
//! so output row order is deterministic.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use emis_ingest::{IngestError, derive_template_name, extract, list_template_files};
use emis_lookup::{CODE_LOOKUP_QUERY, CodeLookupProvider};
use emis_model::{ComponentRecord, LookupRow, ResolvedRecord};
use emis_report::{default_report_path, write_report};
use emis_resolve::{UNRESOLVED_CODE_SENTINEL, resolve_records};

/// What to do with a template file that is not recoverable as XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorPolicy {
    /// Fail the whole run on the first unparseable file.
    Abort,
    /// Record the file as skipped, keep none of its records, and continue.
    Skip,
}

/// Result of the extraction stage.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Extracted records in file order, then document order within a file.
    pub records: Vec<ComponentRecord>,
    /// Processed files with per-file record counts, in processing order.
    pub files: Vec<ExtractedFile>,
    /// Files skipped under [`ParseErrorPolicy::Skip`].
    pub skipped: Vec<String>,
}

/// One successfully processed template file.
#[derive(Debug)]
pub struct ExtractedFile {
    pub path: PathBuf,
    pub template_name: String,
    pub records: usize,
}

/// Discover template files and extract records from each, in order.
///
/// Only parse failures follow `policy`; a skipped file contributes no
/// records at all. Structural errors inside a parseable template (missing
/// required component fields) always propagate.
pub fn extract_stage(folder: &Path, policy: ParseErrorPolicy) -> Result<ExtractionResult> {
    let span = info_span!("extract", folder = %folder.display());
    let _guard = span.enter();
    let start = Instant::now();

    let paths = list_template_files(folder).context("discover template files")?;
    let mut records = Vec::new();
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for path in paths {
        match extract(&path) {
            Ok(file_records) => {
                files.push(ExtractedFile {
                    template_name: derive_template_name(&path),
                    records: file_records.len(),
                    path,
                });
                records.extend(file_records);
            }
            Err(error @ IngestError::Parse { .. }) if policy == ParseErrorPolicy::Skip => {
                warn!(path = %path.display(), %error, "skipping unparseable template");
                skipped.push(path.display().to_string());
            }
            Err(error) => {
                return Err(error).with_context(|| format!("extract {}", path.display()));
            }
        }
    }

    info!(
        files = files.len(),
        records = records.len(),
        skipped = skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(ExtractionResult {
        records,
        files,
        skipped,
    })
}

/// Fetch the full code lookup table, once per run.
pub fn lookup_stage(provider: &dyn CodeLookupProvider) -> Result<Vec<LookupRow>> {
    let span = info_span!("lookup");
    let _guard = span.enter();
    let start = Instant::now();

    let rows = provider
        .fetch_all(CODE_LOOKUP_QUERY)
        .context("fetch code lookup table")?;

    info!(
        rows = rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "code lookup table fetched"
    );
    Ok(rows)
}

/// Resolve all records against the lookup table.
///
/// Returns the resolved records, order and cardinality preserved, plus the
/// count left at the unresolved sentinel.
pub fn resolve_stage(
    records: Vec<ComponentRecord>,
    lookup: &[LookupRow],
) -> Result<(Vec<ResolvedRecord>, usize)> {
    let span = info_span!("resolve");
    let _guard = span.enter();
    let start = Instant::now();

    let resolved = resolve_records(records, lookup).context("resolve codes")?;
    let unresolved = resolved
        .iter()
        .filter(|r| r.standard_code == UNRESOLVED_CODE_SENTINEL)
        .count();

    info!(
        records = resolved.len(),
        unresolved,
        duration_ms = start.elapsed().as_millis(),
        "resolution complete"
    );
    Ok((resolved, unresolved))
}

/// Write the CSV artifact; the report on disk is the unit of completion.
pub fn report_stage(records: &[ResolvedRecord], output: Option<PathBuf>) -> Result<PathBuf> {
    let span = info_span!("report");
    let _guard = span.enter();

    let path = output.unwrap_or_else(default_report_path);
    write_report(&path, records).with_context(|| format!("write report {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "report written");
    Ok(path)
}
