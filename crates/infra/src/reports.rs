//! Read-only views over the store: the issuance report and the CSV export.

use std::sync::Arc;

use toolcrib_inventory::IssuanceReportRow;
use toolcrib_inventory::report::{join_issuances, render_csv};

use crate::store::{InventoryStore, StoreResult};

#[derive(Clone)]
pub struct ReportGenerator {
    store: Arc<dyn InventoryStore>,
}

impl ReportGenerator {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// One row per issuance, in issuance order, joined with its product.
    pub async fn issuance_report(&self) -> StoreResult<Vec<IssuanceReportRow>> {
        let issuances = self.store.list_issuances().await?;
        let products = self.store.list_products().await?;
        Ok(join_issuances(&products, &issuances))
    }

    /// `Product Name,Status` CSV of every product in creation order.
    pub async fn export_csv(&self) -> StoreResult<String> {
        let products = self.store.list_products().await?;
        tracing::debug!(rows = products.len(), "rendering csv export");
        Ok(render_csv(&products))
    }
}
