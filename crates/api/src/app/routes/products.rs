use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use toolcrib_core::{Entity, ProductId};
use toolcrib_inventory::NewProduct;

use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", get(get_product))
}

/// Product listing (`GET /`).
pub async fn index(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store.list_products().await {
        Ok(products) => {
            Json(dto::ListResponse::<dto::ProductResponse>::collect_from(&products)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let new = match NewProduct::new(body.name, body.description) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.create_product(new).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id(), "product created");
            (StatusCode::CREATED, Json(dto::ProductResponse::from(&product))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store.get_product(id).await {
        Ok(product) => Json(dto::ProductResponse::from(&product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
