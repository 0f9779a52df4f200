//! Issue / submit orchestration.
//!
//! The `LifecycleManager` sits between the API layer and the store:
//!
//! ```text
//! issue(product_id)                 submit(issuance_id)
//!   ↓                                 ↓
//! 1. load product (NotFound)        1. load issuance (NotFound)
//!   ↓                                 ↓
//! 2. decide_issue (policy)          2. decide_submit (Conflict if closed)
//!   ↓                                 ↓
//! 3. store.create_issuance          3. store.close_issuance
//!    (opens issuance + In-Use)         (sets date + re-derives status)
//! ```
//!
//! Steps 1-2 are a fast, read-only pre-check; step 3 is the single atomic write and
//! re-checks existence and the open state itself. There is no application-level
//! locking: two concurrent issues of the same product both succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use toolcrib_core::{Entity, IssuanceId, ProductId};
use toolcrib_inventory::lifecycle::{decide_issue, decide_submit};
use toolcrib_inventory::{Issuance, LifecyclePolicy};

use crate::store::{InventoryStore, StoreResult};

#[derive(Clone)]
pub struct LifecycleManager {
    store: Arc<dyn InventoryStore>,
    policy: LifecyclePolicy,
}

impl LifecycleManager {
    pub fn new(store: Arc<dyn InventoryStore>, policy: LifecyclePolicy) -> Self {
        Self { store, policy }
    }

    /// Check a product out: open an issuance and move the product to In-Use.
    #[tracing::instrument(skip(self))]
    pub async fn issue(
        &self,
        product_id: ProductId,
        issued_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        let product = self.store.get_product(product_id).await?;
        decide_issue(&product, &self.policy)?;

        let issuance = self.store.create_issuance(product_id, issued_at).await?;
        tracing::info!(
            issuance_id = %issuance.id(),
            reissue = !product.is_available(),
            "product issued"
        );
        Ok(issuance)
    }

    /// Check a product back in: close the issuance and re-derive the product status.
    #[tracing::instrument(skip(self))]
    pub async fn submit(
        &self,
        issuance_id: IssuanceId,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        let issuance = self.store.get_issuance(issuance_id).await?;
        decide_submit(&issuance)?;

        let closed = self.store.close_issuance(issuance_id, submitted_at).await?;
        let product = self.store.get_product(closed.product_id()).await?;
        tracing::info!(
            product_id = %closed.product_id(),
            status = %product.status(),
            "issuance submitted"
        );
        Ok(closed)
    }
}
