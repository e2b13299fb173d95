//! Integration tests for the audit pipeline stages.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use emis_cli::pipeline::{
    ParseErrorPolicy, extract_stage, lookup_stage, report_stage, resolve_stage,
};
use emis_lookup::CsvLookupProvider;
use emis_report::REPORT_HEADERS;
use emis_resolve::UNRESOLVED_CODE_SENTINEL;

const REVIEW_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<template>
  <libraryItem>
    <libraryItemDefintionName>Chronic Disease</libraryItemDefintionName>
    <templateDefinition>
      <page>
        <title>Review</title>
        <lineData>
          <line>
            <title>Asthma control</title>
            <component>
              <label>Peak flow</label>
              <promptForDate>false</promptForDate>
              <mandatory>true</mandatory>
              <codes>
                <code code="237011" codeSystem="EMISINTERNAL" displayName="Peak flow rate"/>
                <code code="999999" displayName="Not in lookup"/>
              </codes>
            </component>
          </line>
        </lineData>
      </page>
    </templateDefinition>
  </libraryItem>
</template>
"#;

fn setup_study_folder() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("Asthma Review v1.2.xml"), REVIEW_TEMPLATE).unwrap();
    (dir, templates)
}

fn write_lookup(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("CodeLookup.csv");
    fs::write(&path, "EmisCodeId,ReadCV2\n237011,X123\n310551,Y456\n").unwrap();
    path
}

#[test]
fn full_pipeline_produces_complete_report() {
    let (dir, templates) = setup_study_folder();
    let lookup_path = write_lookup(&dir);

    let extraction = extract_stage(&templates, ParseErrorPolicy::Abort).expect("extract");
    assert_eq!(extraction.files.len(), 1);
    assert_eq!(extraction.files[0].template_name, "Asthma Review");
    assert_eq!(extraction.records.len(), 2);
    assert!(extraction.skipped.is_empty());

    let provider = CsvLookupProvider::new(&lookup_path);
    let lookup = lookup_stage(&provider).expect("lookup");
    assert_eq!(lookup.len(), 2);

    let (resolved, unresolved) = resolve_stage(extraction.records, &lookup).expect("resolve");
    assert_eq!(resolved.len(), 2);
    assert_eq!(unresolved, 1);
    assert_eq!(resolved[0].standard_code, "X123");
    assert_eq!(resolved[1].standard_code, UNRESOLVED_CODE_SENTINEL);

    let output = dir.path().join("report.csv");
    let report_path = report_stage(&resolved, Some(output.clone())).expect("report");
    assert_eq!(report_path, output);

    let mut reader = csv::Reader::from_path(&report_path).expect("open report");
    let headers: Vec<String> = reader
        .headers()
        .expect("headers")
        .iter()
        .map(String::from)
        .collect();
    assert_eq!(headers, REPORT_HEADERS);

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "Asthma Review");
    assert_eq!(rows[0][2], "Chronic Disease");
    assert_eq!(rows[0][7], "X123");
    assert_eq!(rows[1][7], UNRESOLVED_CODE_SENTINEL);
}

#[test]
fn abort_policy_fails_on_unparseable_template() {
    let (_dir, templates) = setup_study_folder();
    fs::write(templates.join("Corrupt.xml"), "<template><unclosed>").unwrap();

    let error = extract_stage(&templates, ParseErrorPolicy::Abort).unwrap_err();
    assert!(error.to_string().contains("Corrupt.xml"));
}

#[test]
fn skip_policy_records_unparseable_template_and_continues() {
    let (_dir, templates) = setup_study_folder();
    fs::write(templates.join("Corrupt.xml"), "<template><unclosed>").unwrap();

    let extraction = extract_stage(&templates, ParseErrorPolicy::Skip).expect("extract");
    assert_eq!(extraction.skipped.len(), 1);
    assert!(extraction.skipped[0].contains("Corrupt.xml"));
    // The parseable template still contributes all of its records.
    assert_eq!(extraction.records.len(), 2);
}

#[test]
fn non_numeric_identifier_aborts_resolution() {
    let broken = r#"<?xml version="1.0"?>
<template>
  <libraryItem>
    <templateDefinition>
      <page>
        <lineData>
          <line>
            <title>Somewhere</title>
            <component>
              <label>Field</label>
              <promptForDate>false</promptForDate>
              <mandatory>false</mandatory>
              <codes>
                <code code="EMIS-1"/>
              </codes>
            </component>
          </line>
        </lineData>
      </page>
    </templateDefinition>
  </libraryItem>
</template>
"#;
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("Broken Ids.xml"), broken).unwrap();

    let extraction = extract_stage(&templates, ParseErrorPolicy::Abort).expect("extract");
    let error = resolve_stage(extraction.records, &[]).unwrap_err();
    assert!(format!("{error:#}").contains("EMIS-1"));
}
