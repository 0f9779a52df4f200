//! Infrastructure layer: storage, lifecycle orchestration, reports and imports.

pub mod import;
pub mod lifecycle;
pub mod reports;
pub mod spreadsheet;
pub mod store;
