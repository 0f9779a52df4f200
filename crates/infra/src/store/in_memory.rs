use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use toolcrib_core::{Entity, IssuanceId, ProductId, find_by_id, next_id};
use toolcrib_inventory::{Issuance, NewProduct, Product};

use super::{InventoryStore, StoreError, StoreResult, issuance_not_found, product_not_found};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    issuances: Vec<Issuance>,
}

impl Tables {
    fn open_count(&self, product_id: ProductId) -> usize {
        self.issuances
            .iter()
            .filter(|i| i.is_open() && i.product_id() == product_id)
            .count()
    }

    fn sync_product_status(&mut self, product_id: ProductId) {
        let open = self.open_count(product_id);
        if let Some(p) = self.products.iter_mut().find(|p| p.id() == product_id) {
            p.sync_status(open);
        }
    }

    fn insert_product(&mut self, new: NewProduct) -> Product {
        let product = Product::create(next_id(&self.products), new);
        self.products.push(product.clone());
        product
    }
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Not optimized for performance. Each operation holds the
/// write lock for its whole duration, which makes it atomic.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> StoreResult<T>) -> StoreResult<T> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        f(&tables)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> StoreResult<T>) -> StoreResult<T> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut tables)
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        self.write(|t| Ok(t.insert_product(product)))
    }

    async fn create_products(&self, products: Vec<NewProduct>) -> StoreResult<Vec<Product>> {
        self.write(|t| Ok(products.into_iter().map(|p| t.insert_product(p)).collect()))
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.read(|t| {
            find_by_id(&t.products, id)
                .cloned()
                .ok_or_else(|| product_not_found(id))
        })
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.read(|t| Ok(t.products.clone()))
    }

    async fn create_issuance(
        &self,
        product_id: ProductId,
        issued_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        self.write(|t| {
            if find_by_id(&t.products, product_id).is_none() {
                return Err(product_not_found(product_id));
            }
            let issuance = Issuance::open(next_id(&t.issuances), product_id, issued_at);
            t.issuances.push(issuance.clone());
            t.sync_product_status(product_id);
            Ok(issuance)
        })
    }

    async fn get_issuance(&self, id: IssuanceId) -> StoreResult<Issuance> {
        self.read(|t| {
            find_by_id(&t.issuances, id)
                .cloned()
                .ok_or_else(|| issuance_not_found(id))
        })
    }

    async fn list_issuances(&self) -> StoreResult<Vec<Issuance>> {
        self.read(|t| Ok(t.issuances.clone()))
    }

    async fn open_issuances(&self, product_id: ProductId) -> StoreResult<Vec<Issuance>> {
        self.read(|t| {
            Ok(t.issuances
                .iter()
                .filter(|i| i.is_open() && i.product_id() == product_id)
                .cloned()
                .collect())
        })
    }

    async fn close_issuance(
        &self,
        id: IssuanceId,
        submitted_at: DateTime<Utc>,
    ) -> StoreResult<Issuance> {
        self.write(|t| {
            let issuance = t
                .issuances
                .iter_mut()
                .find(|i| i.id() == id)
                .ok_or_else(|| issuance_not_found(id))?;
            issuance.close(submitted_at)?;
            let closed = issuance.clone();
            t.sync_product_status(closed.product_id());
            Ok(closed)
        })
    }

    async fn clear_all(&self) -> StoreResult<()> {
        self.write(|t| {
            t.issuances.clear();
            t.products.clear();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;
    use std::sync::Arc;

    #[tokio::test]
    async fn issue_submit_scenario() {
        contract::issue_submit_scenario(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        contract::unknown_ids_are_not_found(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn double_submit_conflicts() {
        contract::double_submit_conflicts(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn reissue_keeps_product_in_use_until_last_submit() {
        contract::reissue_keeps_product_in_use_until_last_submit(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn clear_all_empties_and_restarts_ids() {
        contract::clear_all_empties_and_restarts_ids(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test]
    async fn batch_insert_preserves_order() {
        contract::batch_insert_preserves_order(&InMemoryInventoryStore::new()).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_complete() {
        contract::concurrent_writes_complete(Arc::new(InMemoryInventoryStore::new())).await;
    }
}
