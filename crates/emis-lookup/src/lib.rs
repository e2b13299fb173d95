pub mod csv_provider;
pub mod error;
pub mod provider;

pub use csv_provider::{CsvLookupProvider, read_lookup_rows};
pub use error::{LookupError, Result};
pub use provider::{CODE_LOOKUP_QUERY, CodeLookupProvider, StaticLookupProvider};
