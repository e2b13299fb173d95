//! Rows of the code lookup reference table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column holding the internal EMIS identifier.
pub const EMIS_CODE_ID_COLUMN: &str = "EmisCodeId";

/// Column holding the standardized Read code.
pub const READ_CV2_COLUMN: &str = "ReadCV2";

/// One row of the code lookup reference table.
///
/// Rows are column-name keyed; providers substitute empty strings for null
/// cells, so every known column is present with at least an empty value.
/// Row order within the table is carried by the surrounding `Vec` and is
/// significant: resolution is first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow {
    columns: BTreeMap<String, String>,
}

impl LookupRow {
    pub fn new(columns: BTreeMap<String, String>) -> Self {
        Self { columns }
    }

    /// Raw cell value, `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// The row's internal identifier after numeric coercion.
    ///
    /// `None` when the column is absent, empty, or not an integer; such rows
    /// never match any record.
    pub fn emis_code_id(&self) -> Option<i64> {
        self.get(EMIS_CODE_ID_COLUMN)
            .and_then(|value| value.trim().parse().ok())
    }

    /// The standardized Read code, empty when the column is absent.
    pub fn read_cv2(&self) -> &str {
        self.get(READ_CV2_COLUMN).unwrap_or("")
    }
}

impl FromIterator<(String, String)> for LookupRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
