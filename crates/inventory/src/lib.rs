//! Inventory check-out domain.
//!
//! This crate contains the business rules for products and issuances, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod import;
pub mod issuance;
pub mod lifecycle;
pub mod product;
pub mod report;
pub mod sample;

pub use import::{ImportReport, ImportRow, RowFailure, SheetGrid};
pub use issuance::Issuance;
pub use lifecycle::{LifecyclePolicy, status_mismatches};
pub use product::{NewProduct, Product, ProductStatus};
pub use report::IssuanceReportRow;
