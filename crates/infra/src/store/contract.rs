//! Behaviour every `InventoryStore` implementation must share.
//!
//! Each implementation's test module calls these against a fresh store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use toolcrib_core::{DomainError, Entity, IssuanceId, ProductId};
use toolcrib_inventory::{NewProduct, ProductStatus, status_mismatches};

use super::{InventoryStore, StoreError};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

fn new_product(name: &str) -> NewProduct {
    NewProduct::new(name, None).unwrap()
}

async fn assert_consistent(store: &dyn InventoryStore) {
    let products = store.list_products().await.unwrap();
    let issuances = store.list_issuances().await.unwrap();
    assert!(
        status_mismatches(&products, &issuances).is_empty(),
        "status out of sync: {products:?} / {issuances:?}"
    );
}

pub async fn issue_submit_scenario(store: &dyn InventoryStore) {
    let product = store.create_product(new_product("A")).await.unwrap();
    assert_eq!(product.id(), ProductId::new(1));
    assert_eq!(product.status(), ProductStatus::Available);

    let issuance = store.create_issuance(product.id(), at(9)).await.unwrap();
    assert_eq!(issuance.id(), IssuanceId::new(1));
    assert_eq!(issuance.product_id(), product.id());
    assert_eq!(issuance.submission_date(), None);
    assert_eq!(store.get_product(product.id()).await.unwrap().status(), ProductStatus::InUse);
    assert_consistent(store).await;

    let closed = store.close_issuance(issuance.id(), at(10)).await.unwrap();
    assert_eq!(closed.submission_date(), Some(at(10)));
    assert_eq!(store.get_issuance(issuance.id()).await.unwrap().submission_date(), Some(at(10)));
    assert_eq!(store.get_product(product.id()).await.unwrap().status(), ProductStatus::Available);
    assert_consistent(store).await;
}

pub async fn unknown_ids_are_not_found(store: &dyn InventoryStore) {
    assert!(store.get_product(ProductId::new(404)).await.unwrap_err().is_not_found());
    assert!(store.get_issuance(IssuanceId::new(404)).await.unwrap_err().is_not_found());
    assert!(store.close_issuance(IssuanceId::new(404), at(9)).await.unwrap_err().is_not_found());

    let err = store.create_issuance(ProductId::new(404), at(9)).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(store.list_issuances().await.unwrap().is_empty());
}

pub async fn double_submit_conflicts(store: &dyn InventoryStore) {
    let product = store.create_product(new_product("A")).await.unwrap();
    let issuance = store.create_issuance(product.id(), at(9)).await.unwrap();
    store.close_issuance(issuance.id(), at(10)).await.unwrap();

    let err = store.close_issuance(issuance.id(), at(11)).await.unwrap_err();
    assert!(matches!(err, StoreError::Domain(DomainError::Conflict(_))));
    assert_eq!(store.get_issuance(issuance.id()).await.unwrap().submission_date(), Some(at(10)));
}

pub async fn reissue_keeps_product_in_use_until_last_submit(store: &dyn InventoryStore) {
    let product = store.create_product(new_product("A")).await.unwrap();
    let first = store.create_issuance(product.id(), at(9)).await.unwrap();
    let second = store.create_issuance(product.id(), at(10)).await.unwrap();
    assert_eq!(store.open_issuances(product.id()).await.unwrap().len(), 2);

    store.close_issuance(first.id(), at(11)).await.unwrap();
    assert_eq!(store.get_product(product.id()).await.unwrap().status(), ProductStatus::InUse);
    assert_consistent(store).await;

    store.close_issuance(second.id(), at(12)).await.unwrap();
    assert_eq!(store.get_product(product.id()).await.unwrap().status(), ProductStatus::Available);
    assert!(store.open_issuances(product.id()).await.unwrap().is_empty());
    assert_consistent(store).await;
}

pub async fn clear_all_empties_and_restarts_ids(store: &dyn InventoryStore) {
    let product = store.create_product(new_product("A")).await.unwrap();
    store.create_issuance(product.id(), at(9)).await.unwrap();

    store.clear_all().await.unwrap();
    assert!(store.list_products().await.unwrap().is_empty());
    assert!(store.list_issuances().await.unwrap().is_empty());

    let again = store.create_product(new_product("B")).await.unwrap();
    assert_eq!(again.id(), ProductId::new(1));
}

pub async fn batch_insert_preserves_order(store: &dyn InventoryStore) {
    let created = store
        .create_products(vec![new_product("MOLD 1"), new_product("MOLD 2"), new_product("MOLD 3")])
        .await
        .unwrap();
    assert_eq!(created.len(), 3);

    let listed = store.list_products().await.unwrap();
    let names: Vec<_> = listed.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["MOLD 1", "MOLD 2", "MOLD 3"]);
    assert!(listed.iter().all(|p| p.status() == ProductStatus::Available));
    assert_eq!(listed, created);
}

/// Concurrent issues of one product all succeed, and racing submits of the same
/// issuance yield exactly one success and one conflict.
pub async fn concurrent_writes_complete(store: Arc<dyn InventoryStore>) {
    const WRITERS: usize = 20;
    let pid = store.create_product(new_product("A")).await.unwrap().id();

    let issues: Vec<_> = (0..WRITERS)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move { store.create_issuance(pid, at(n as u32 % 24)).await })
        })
        .collect();
    let mut issued = Vec::with_capacity(WRITERS);
    for handle in issues {
        issued.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(store.open_issuances(pid).await.unwrap().len(), WRITERS);
    assert_eq!(store.get_product(pid).await.unwrap().status(), ProductStatus::InUse);

    let submits: Vec<_> = issued
        .iter()
        .flat_map(|issuance| [issuance.id(), issuance.id()])
        .map(|id| {
            let store = store.clone();
            tokio::spawn(async move { store.close_issuance(id, at(23)).await })
        })
        .collect();
    let (mut closed, mut conflicts) = (0, 0);
    for handle in submits {
        match handle.await.unwrap() {
            Ok(_) => closed += 1,
            Err(StoreError::Domain(DomainError::Conflict(_))) => conflicts += 1,
            Err(other) => panic!("unexpected submit failure: {other}"),
        }
    }
    assert_eq!((closed, conflicts), (WRITERS, WRITERS));
    assert_eq!(store.get_product(pid).await.unwrap().status(), ProductStatus::Available);
    assert_consistent(store.as_ref()).await;
}
