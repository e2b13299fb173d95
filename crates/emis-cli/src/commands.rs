use anyhow::Result;
use comfy_table::Table;

use emis_cli::pipeline::{
    ParseErrorPolicy, extract_stage, lookup_stage, report_stage, resolve_stage,
};
use emis_lookup::CsvLookupProvider;
use emis_report::REPORT_HEADERS;
use emis_resolve::UNRESOLVED_CODE_SENTINEL;

use crate::cli::{AuditArgs, ParseErrorPolicyArg};
use crate::summary::apply_table_style;
use crate::types::{AuditResult, FileSummary};

pub fn run_audit(args: &AuditArgs) -> Result<AuditResult> {
    let policy = match args.on_parse_error {
        ParseErrorPolicyArg::Abort => ParseErrorPolicy::Abort,
        ParseErrorPolicyArg::Skip => ParseErrorPolicy::Skip,
    };

    let extraction = extract_stage(&args.templates_folder, policy)?;

    let provider = CsvLookupProvider::new(&args.lookup);
    let lookup = lookup_stage(&provider)?;

    let (resolved, _unresolved) = resolve_stage(extraction.records, &lookup)?;

    let report_path = report_stage(&resolved, args.output.clone())?;

    // Resolution preserves extraction order, so per-file counts fall out of
    // chunking the resolved records by each file's record count.
    let mut files = Vec::with_capacity(extraction.files.len());
    let mut offset = 0usize;
    for file in extraction.files {
        let slice = &resolved[offset..offset + file.records];
        let unresolved = slice
            .iter()
            .filter(|r| r.standard_code == UNRESOLVED_CODE_SENTINEL)
            .count();
        offset += file.records;
        files.push(FileSummary {
            path: file.path,
            template_name: file.template_name,
            records: file.records,
            unresolved,
        });
    }

    let has_errors = !extraction.skipped.is_empty();
    Ok(AuditResult {
        report_path,
        files,
        lookup_rows: lookup.len(),
        skipped_files: extraction.skipped,
        has_errors,
    })
}

pub fn run_columns() {
    let mut table = Table::new();
    table.set_header(vec!["#", "Column"]);
    apply_table_style(&mut table);
    for (idx, column) in REPORT_HEADERS.iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), (*column).to_string()]);
    }
    println!("{table}");
}
