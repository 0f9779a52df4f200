//! Read-only projections: issuance report rows and the CSV status export.

use std::collections::HashMap;

use toolcrib_core::{Entity, ProductId};

use crate::issuance::Issuance;
use crate::product::Product;

pub const CSV_HEADER: &str = "Product Name,Status";
pub const CSV_FILENAME: &str = "report.csv";

/// One issuance joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceReportRow {
    pub product: Product,
    pub issuance: Issuance,
}

/// Join each issuance (in the given order) with its product.
///
/// Issuances whose product is missing are left out.
pub fn join_issuances(products: &[Product], issuances: &[Issuance]) -> Vec<IssuanceReportRow> {
    let by_id: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id(), p)).collect();

    issuances
        .iter()
        .filter_map(|i| {
            by_id.get(&i.product_id()).map(|p| IssuanceReportRow {
                product: (*p).clone(),
                issuance: i.clone(),
            })
        })
        .collect()
}

/// Render the `Product Name,Status` export.
///
/// Names are written verbatim: a comma or quote inside a name is not escaped.
pub fn render_csv(products: &[Product]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + products.len() * 24);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for p in products {
        out.push_str(p.name());
        out.push(',');
        out.push_str(p.status().as_str());
        out.push('\n');
    }
    out
}
