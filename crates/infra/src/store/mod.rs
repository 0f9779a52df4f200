//! Inventory store: durable storage of products and issuances.
//!
//! The store owns the status invariant: every write that opens or closes an
//! issuance also re-derives the owning product's status in the same unit of work,
//! so a product is Available exactly when it has no open issuance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use toolcrib_core::{DomainError, IssuanceId, ProductId};
use toolcrib_inventory::{Issuance, NewProduct, Product};

pub mod in_memory;
pub mod sqlite;

#[cfg(test)]
mod contract;

pub use in_memory::InMemoryInventoryStore;
pub use sqlite::SqliteInventoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// `Domain` carries the deterministic failures callers act on (not found,
/// validation, conflict); the rest are infrastructure failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be decoded into a domain record.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            StoreError::Domain(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.domain().is_some_and(DomainError::is_not_found)
    }
}

pub(crate) fn product_not_found(id: ProductId) -> StoreError {
    DomainError::not_found(format!("product {id}")).into()
}

pub(crate) fn issuance_not_found(id: IssuanceId) -> StoreError {
    DomainError::not_found(format!("issuance {id}")).into()
}

/// Persistent record of products and issuances.
///
/// Every method is one atomic unit of work: it is either fully applied or not
/// applied at all.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product>;

    /// Insert a batch of products in one transaction, in the given order.
    async fn create_products(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>>;

    async fn get_product(&self, id: ProductId) -> StoreResult<Product>;

    /// All products in creation order.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Open a new issuance for an existing product and mark the product In-Use.
    async fn create_issuance(
        &self,
        product_id: ProductId,
        issued_at: DateTime<Utc>,
    ) -> StoreResult<Issuance>;

    async fn get_issuance(&self, id: IssuanceId) -> StoreResult<Issuance>;

    /// All issuances in creation order.
    async fn list_issuances(&self) -> StoreResult<Vec<Issuance>>;

    async fn open_issuances(&self, product_id: ProductId) -> StoreResult<Vec<Issuance>>;

    /// Set the submission date of an open issuance and re-derive the product status.
    ///
    /// Fails with `DomainError::Conflict` if the issuance was already submitted.
    async fn close_issuance(
        &self,
        id: IssuanceId,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Issuance>;

    /// Delete every issuance, then every product.
    async fn clear_all(&self) -> StoreResult<()>;
}
