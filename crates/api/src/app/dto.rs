use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use toolcrib_core::Entity;
use toolcrib_inventory::{Issuance, IssuanceReportRow, Product, ProductStatus};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanForm {
    pub scanned_data: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProductStatus,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().get(),
            name: p.name().to_string(),
            description: p.description().map(str::to_string),
            status: p.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IssuanceResponse {
    pub id: i64,
    pub product_id: i64,
    pub issue_date: DateTime<Utc>,
    pub submission_date: Option<DateTime<Utc>>,
}

impl From<&Issuance> for IssuanceResponse {
    fn from(i: &Issuance) -> Self {
        Self {
            id: i.id().get(),
            product_id: i.product_id().get(),
            issue_date: i.issue_date(),
            submission_date: i.submission_date(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportRowResponse {
    pub product: ProductResponse,
    pub issuance: IssuanceResponse,
}

impl From<&IssuanceReportRow> for ReportRowResponse {
    fn from(row: &IssuanceReportRow) -> Self {
        Self {
            product: (&row.product).into(),
            issuance: (&row.issuance).into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn collect_from<'a, S, I>(source: I) -> Self
    where
        S: 'a,
        I: IntoIterator<Item = &'a S>,
        T: From<&'a S>,
    {
        Self {
            items: source.into_iter().map(T::from).collect(),
        }
    }
}
