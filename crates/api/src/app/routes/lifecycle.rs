use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use toolcrib_core::{IssuanceId, ProductId};

use crate::app::routes::common::{back_to_index, parse_id};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `GET /issue/:product_id`: check the product out, then back to the listing.
pub async fn issue(
    Extension(services): Extension<Arc<AppServices>>,
    Path(product_id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match parse_id(&product_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.issue(product_id, Utc::now()).await {
        Ok(_) => back_to_index().into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /submit/:issuance_id`: check the product back in, then back to the listing.
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(issuance_id): Path<String>,
) -> axum::response::Response {
    let issuance_id: IssuanceId = match parse_id(&issuance_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.lifecycle.submit(issuance_id, Utc::now()).await {
        Ok(_) => back_to_index().into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_issuance(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: IssuanceId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store.get_issuance(id).await {
        Ok(issuance) => Json(dto::IssuanceResponse::from(&issuance)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
