pub mod csv_report;
pub mod project;

pub use csv_report::{default_report_path, ensure_parent_dir, write_report};
pub use project::{REPORT_HEADERS, project, project_record};
