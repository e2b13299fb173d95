//! Record types produced by template extraction and code resolution.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One coded entry extracted from an EMIS template.
///
/// A record is built once, at extraction time, from a `code` element and the
/// context recovered from its ancestors. It is never mutated afterwards; the
/// resolve stage wraps it in a [`ResolvedRecord`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Internal EMIS identifier to resolve. Always non-empty: code elements
    /// without one are never promoted to records.
    pub code_system_id: String,
    /// All other attributes present on the `code` element
    /// (e.g. `displayName`, `codeSystem`).
    pub code_attributes: BTreeMap<String, String>,
    /// Template name derived from the file name, version suffix stripped.
    pub template_name: String,
    /// Library item name, empty when the ancestor field is absent.
    pub library_name: String,
    /// Page title, empty when the ancestor field is absent.
    pub page_name: String,
    /// Title of the component's direct parent.
    pub location_title: String,
    /// Prompt text shown for the component.
    pub prompt_label: String,
    /// Raw `mandatory` flag text.
    pub mandatory_flag: String,
    /// Raw `promptForDate` flag text.
    pub prompt_for_date_flag: String,
    /// `"diary"` when the component carries a `diary` element, else empty.
    pub diary_flag: String,
    /// Path of the template file the record came from.
    pub source_path: PathBuf,
}

impl ComponentRecord {
    /// Look up one of the code element's own attributes, empty when absent.
    pub fn code_attribute(&self, name: &str) -> &str {
        self.code_attributes
            .get(name)
            .map_or("", String::as_str)
    }
}

/// A [`ComponentRecord`] joined against the code lookup table.
///
/// Every extracted record produces exactly one resolved record;
/// `standard_code` holds either the joined Read code or the resolver's
/// fallback sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// The extracted record, unchanged.
    pub record: ComponentRecord,
    /// Standardized code, or the "can't resolve" sentinel.
    pub standard_code: String,
}
