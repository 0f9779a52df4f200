//! Available / In-Use state machine.
//!
//! `issue` opens an issuance and moves the product to In-Use; `submit` closes an
//! issuance and re-derives the product status from whatever issuances remain open.
//! There is no terminal state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use toolcrib_core::{DomainError, DomainResult, Entity, ProductId};

use crate::issuance::Issuance;
use crate::product::{Product, ProductStatus};

/// Knobs for the issue transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecyclePolicy {
    /// Whether an In-Use product may be issued again (opening a second issuance).
    pub allow_reissue: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self { allow_reissue: true }
    }
}

/// Decide whether `product` may be issued under `policy`.
pub fn decide_issue(product: &Product, policy: &LifecyclePolicy) -> DomainResult<()> {
    if !policy.allow_reissue && product.status() == ProductStatus::InUse {
        return Err(DomainError::conflict(format!(
            "product {} is already in use",
            product.id()
        )));
    }
    Ok(())
}

/// Decide whether `issuance` may be submitted.
pub fn decide_submit(issuance: &Issuance) -> DomainResult<()> {
    if !issuance.is_open() {
        return Err(DomainError::conflict(format!(
            "issuance {} already submitted",
            issuance.id()
        )));
    }
    Ok(())
}

/// Products whose stored status disagrees with their open issuances.
///
/// Empty when the store is consistent.
pub fn status_mismatches(products: &[Product], issuances: &[Issuance]) -> Vec<ProductId> {
    let mut open: HashMap<ProductId, usize> = HashMap::new();
    for i in issuances.iter().filter(|i| i.is_open()) {
        *open.entry(i.product_id()).or_default() += 1;
    }

    products
        .iter()
        .filter(|p| {
            let expected = ProductStatus::from_open_count(open.get(&p.id()).copied().unwrap_or(0));
            p.status() != expected
        })
        .map(|p| p.id())
        .collect()
}
