//! The code lookup provider boundary.

use emis_model::LookupRow;

use crate::error::Result;

/// Query issued once per run to materialize the full reference table.
pub const CODE_LOOKUP_QUERY: &str = "select * from dbo.CodeLookup";

/// Source of code lookup reference rows.
///
/// Implementations return rows in a stable order; resolution is
/// first-match-wins over that order. Null cells are substituted with empty
/// strings by the provider, not by callers.
pub trait CodeLookupProvider {
    fn fetch_all(&self, query: &str) -> Result<Vec<LookupRow>>;
}

/// In-memory provider holding a fixed set of rows.
#[derive(Debug, Clone, Default)]
pub struct StaticLookupProvider {
    rows: Vec<LookupRow>,
}

impl StaticLookupProvider {
    pub fn new(rows: Vec<LookupRow>) -> Self {
        Self { rows }
    }
}

impl CodeLookupProvider for StaticLookupProvider {
    fn fetch_all(&self, _query: &str) -> Result<Vec<LookupRow>> {
        Ok(self.rows.clone())
    }
}
