pub mod discovery;
pub mod error;
pub mod template;

pub use discovery::list_template_files;
pub use error::{IngestError, Result};
pub use template::{derive_template_name, extract};
