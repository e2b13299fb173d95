//! CSV report artifact writing.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;

use emis_model::ResolvedRecord;

use crate::project::{REPORT_HEADERS, project_record};

/// Default artifact path in the system temp directory, stamped to the
/// minute, e.g. `emis_template_analysis_06Aug26_1412.csv`.
pub fn default_report_path() -> PathBuf {
    let timestamp = Local::now().format("%d%b%y_%H%M");
    std::env::temp_dir().join(format!("emis_template_analysis_{timestamp}.csv"))
}

/// Creates the parent directory of an output path if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Writes the full report: header row plus one row per resolved record.
///
/// The file is written in full and flushed; the report on disk is the unit
/// of successful completion.
pub fn write_report(path: &Path, records: &[ResolvedRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));
    writer
        .write_record(REPORT_HEADERS)
        .context("write report header")?;
    for resolved in records {
        writer
            .write_record(project_record(resolved))
            .context("write report row")?;
    }
    writer.flush().context("flush report")?;
    Ok(())
}
