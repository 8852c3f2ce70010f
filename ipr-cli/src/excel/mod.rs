//! Excel import/export for the patent register

pub mod export;
pub mod import;

pub use export::{ExportKind, export_to_dir};
pub use import::{ImportResult, import_default, import_file};
