//! Fixed demo data.

use toolcrib_core::DomainResult;

use crate::product::NewProduct;

/// Three demo molds: "MOLD 1".."MOLD 3" on "SHELF ID 1".."SHELF ID 3".
pub fn sample_products() -> DomainResult<Vec<NewProduct>> {
    (1..=3)
        .map(|n| NewProduct::new(format!("MOLD {n}"), Some(format!("SHELF ID {n}"))))
        .collect()
}
