use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse};

use crate::app::errors;
use crate::app::routes::common::back_to_index;
use crate::app::services::AppServices;

/// `GET /clear`: delete every issuance and product.
pub async fn clear(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store.clear_all().await {
        Ok(()) => {
            tracing::warn!("inventory cleared");
            back_to_index().into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /add_sample_data`: seed the demo molds.
pub async fn add_sample_data(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.importer.seed_sample_data().await {
        Ok(products) => {
            tracing::info!(seeded = products.len(), "sample data added");
            back_to_index().into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
