//! Projection of resolved records onto the fixed report column set.

use emis_model::ResolvedRecord;

/// Report columns, in output order.
pub const REPORT_HEADERS: [&str; 12] = [
    "path",
    "template name",
    "library",
    "page",
    "location",
    "prompt",
    "displayName",
    "code",
    "codeSystem",
    "mandatory",
    "prompt for date",
    "diary",
];

/// Projects one record into the fixed header order.
///
/// Code attributes outside the header set are dropped; headers with no
/// corresponding value come out as empty strings. `displayName` and
/// `codeSystem` are read from the code element's own attributes, while
/// `code` carries the resolved standard code or the resolver's sentinel.
pub fn project_record(resolved: &ResolvedRecord) -> Vec<String> {
    REPORT_HEADERS
        .iter()
        .map(|header| field_value(resolved, header))
        .collect()
}

/// Projects all records, preserving order.
pub fn project(records: &[ResolvedRecord]) -> Vec<Vec<String>> {
    records.iter().map(project_record).collect()
}

fn field_value(resolved: &ResolvedRecord, header: &str) -> String {
    let record = &resolved.record;
    match header {
        "path" => record.source_path.display().to_string(),
        "template name" => record.template_name.clone(),
        "library" => record.library_name.clone(),
        "page" => record.page_name.clone(),
        "location" => record.location_title.clone(),
        "prompt" => record.prompt_label.clone(),
        "displayName" => record.code_attribute("displayName").to_string(),
        "code" => resolved.standard_code.clone(),
        "codeSystem" => record.code_attribute("codeSystem").to_string(),
        "mandatory" => record.mandatory_flag.clone(),
        "prompt for date" => record.prompt_for_date_flag.clone(),
        "diary" => record.diary_flag.clone(),
        _ => String::new(),
    }
}
