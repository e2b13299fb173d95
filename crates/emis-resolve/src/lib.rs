//! Joins extracted component records against the code lookup table.

pub mod error;

use tracing::warn;

use emis_model::{ComponentRecord, LookupRow, ResolvedRecord};

pub use error::{ResolveError, Result};

/// Fallback written when an identifier has no row in the lookup table.
///
/// Deliberately sortable and greppable so unresolved rows stand out in the
/// report.
pub const UNRESOLVED_CODE_SENTINEL: &str = "zzzCan't resolve code";

/// Resolves every record against the lookup table.
///
/// Cardinality and order are preserved: each input record yields exactly one
/// resolved record, in input order. The only failure mode is a record whose
/// identifier cannot be coerced to an integer.
pub fn resolve_records(
    records: Vec<ComponentRecord>,
    lookup: &[LookupRow],
) -> Result<Vec<ResolvedRecord>> {
    records
        .into_iter()
        .map(|record| resolve_record(record, lookup))
        .collect()
}

/// Resolves one record: first row whose `EmisCodeId` matches wins.
///
/// The reference table is assumed to hold at most one row per identifier,
/// but this is not enforced; ties resolve to the first occurrence in row
/// order. No match falls back to [`UNRESOLVED_CODE_SENTINEL`].
pub fn resolve_record(record: ComponentRecord, lookup: &[LookupRow]) -> Result<ResolvedRecord> {
    let id: i64 = record.code_system_id.trim().parse().map_err(|_| {
        ResolveError::NonNumericIdentifier {
            code_system_id: record.code_system_id.clone(),
            template_name: record.template_name.clone(),
            source_path: record.source_path.clone(),
        }
    })?;

    let standard_code = match lookup.iter().find(|row| row.emis_code_id() == Some(id)) {
        Some(row) => row.read_cv2().to_string(),
        None => {
            warn!(
                code_system_id = %record.code_system_id,
                template = %record.template_name,
                "code not found in lookup table"
            );
            UNRESOLVED_CODE_SENTINEL.to_string()
        }
    };

    Ok(ResolvedRecord {
        record,
        standard_code,
    })
}
