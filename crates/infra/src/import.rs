//! Bulk product creation: spreadsheet import and demo seeding.
//!
//! Imports are all-or-nothing. Every row is validated before anything is written;
//! if any row fails, the whole import is rejected with a report of every failing
//! row, otherwise all products are inserted in one store transaction.

use std::sync::Arc;

use thiserror::Error;

use toolcrib_inventory::import::{ensure_xlsx_filename, rows_from_grid, validate_rows};
use toolcrib_inventory::sample::sample_products;
use toolcrib_inventory::{ImportReport, ImportRow, Product};

use crate::spreadsheet::read_first_sheet;
use crate::store::{InventoryStore, StoreResult};

#[derive(Debug, Error)]
pub enum ImportError {
    /// The upload is not an `.xlsx` file.
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    /// The workbook could not be read.
    #[error("unreadable spreadsheet: {0}")]
    Spreadsheet(String),

    /// The sheet layout is unusable (e.g. no `name` column).
    #[error("invalid sheet: {0}")]
    InvalidSheet(String),

    /// One or more rows failed validation; nothing was imported.
    #[error("import rejected: {} invalid row(s)", .0.failures.len())]
    Rejected(ImportReport),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}

#[derive(Clone)]
pub struct Importer {
    store: Arc<dyn InventoryStore>,
}

impl Importer {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Validate `rows` and create one Available product per row.
    ///
    /// Returns the number of products created.
    pub async fn bulk_import(&self, rows: Vec<ImportRow>) -> Result<usize, ImportError> {
        let total = rows.len();
        let products = validate_rows(rows).map_err(|report| {
            tracing::warn!(
                rows = total,
                failures = report.failures.len(),
                "import rejected"
            );
            ImportError::Rejected(report)
        })?;

        let created = self.store.create_products(products).await?;
        tracing::info!(imported = created.len(), "products imported");
        Ok(created.len())
    }

    /// Import an uploaded `.xlsx` workbook (first sheet, `name`/`description` columns).
    pub async fn import_xlsx(&self, filename: &str, bytes: Vec<u8>) -> Result<usize, ImportError> {
        ensure_xlsx_filename(filename).map_err(|e| ImportError::InvalidFileType(e.to_string()))?;

        let grid = tokio::task::spawn_blocking(move || read_first_sheet(&bytes))
            .await
            .map_err(|e| ImportError::Spreadsheet(e.to_string()))?
            .map_err(ImportError::Spreadsheet)?;
        let rows = rows_from_grid(&grid).map_err(|e| ImportError::InvalidSheet(e.to_string()))?;

        tracing::debug!(filename, rows = rows.len(), "parsed workbook");
        self.bulk_import(rows).await
    }

    /// Insert the three demo molds.
    pub async fn seed_sample_data(&self) -> StoreResult<Vec<Product>> {
        let samples = sample_products()?;
        self.store.create_products(samples).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::tests::workbook;
    use crate::store::{InMemoryInventoryStore, SqliteInventoryStore};
    use toolcrib_inventory::ProductStatus;

    fn row(n: usize, name: Option<&str>, description: Option<&str>) -> ImportRow {
        ImportRow::new(n, name.map(String::from), description.map(String::from))
    }

    fn fixture() -> (Importer, Arc<dyn InventoryStore>) {
        let store: Arc<dyn InventoryStore> = Arc::new(InMemoryInventoryStore::new());
        (Importer::new(store.clone()), store)
    }

    #[tokio::test]
    async fn single_row_creates_one_available_product() {
        let (importer, store) = fixture();
        let count = importer
            .bulk_import(vec![row(2, Some("MOLD 1"), Some("SHELF ID 1"))])
            .await
            .unwrap();
        assert_eq!(count, 1);

        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "MOLD 1");
        assert_eq!(products[0].description(), Some("SHELF ID 1"));
        assert_eq!(products[0].status(), ProductStatus::Available);
    }

    #[tokio::test]
    async fn invalid_row_rejects_whole_import() {
        let (importer, store) = fixture();
        let err = importer
            .bulk_import(vec![
                row(2, Some("MOLD 1"), None),
                row(3, None, Some("SHELF ID 2")),
                row(4, Some("MOLD 3"), None),
            ])
            .await
            .unwrap_err();

        match err {
            ImportError::Rejected(report) => {
                assert_eq!(report.accepted, 2);
                assert_eq!(report.failures.len(), 1);
                assert_eq!(report.failures[0].row, 3);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn xlsx_upload_is_imported() {
        let (importer, store) = fixture();
        let bytes = workbook(&[
            &["name", "description"],
            &["MOLD 1", "SHELF ID 1"],
            &["MOLD 2", "SHELF ID 2"],
        ]);
        assert_eq!(importer.import_xlsx("molds.xlsx", bytes).await.unwrap(), 2);
        assert_eq!(store.list_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_xlsx_upload_is_rejected_before_parsing() {
        let (importer, store) = fixture();
        let err = importer.import_xlsx("molds.csv", b"name\nMOLD 1\n".to_vec()).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidFileType(_)));
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sheet_without_name_column_is_invalid() {
        let (importer, _store) = fixture();
        let bytes = workbook(&[&["title"], &["MOLD 1"]]);
        let err = importer.import_xlsx("molds.xlsx", bytes).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidSheet(_)));
    }

    #[tokio::test]
    async fn corrupt_workbook_is_a_spreadsheet_error() {
        let (importer, _store) = fixture();
        let err = importer.import_xlsx("molds.xlsx", b"garbage".to_vec()).await.unwrap_err();
        assert!(matches!(err, ImportError::Spreadsheet(_)));
    }

    #[tokio::test]
    async fn sample_data_seeds_three_molds_into_sqlite() {
        let store: Arc<dyn InventoryStore> = Arc::new(SqliteInventoryStore::in_memory().await.unwrap());
        let importer = Importer::new(store.clone());

        let seeded = importer.seed_sample_data().await.unwrap();
        assert_eq!(seeded.len(), 3);

        let listed = store.list_products().await.unwrap();
        assert_eq!(listed[2].name(), "MOLD 3");
        assert_eq!(listed[2].description(), Some("SHELF ID 3"));
    }
}
