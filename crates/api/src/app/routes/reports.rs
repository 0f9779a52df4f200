use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::IntoResponse,
    Json,
};

use toolcrib_inventory::report::CSV_FILENAME;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `GET /report`: every issuance joined with its product.
pub async fn report(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.reports.issuance_report().await {
        Ok(rows) => {
            Json(dto::ListResponse::<dto::ReportRowResponse>::collect_from(&rows)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /download_report`: product statuses as a CSV attachment.
pub async fn download_report(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.reports.export_csv().await {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={CSV_FILENAME}"),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
