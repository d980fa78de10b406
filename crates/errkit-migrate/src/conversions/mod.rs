pub mod error_calls;
pub mod import_path;
