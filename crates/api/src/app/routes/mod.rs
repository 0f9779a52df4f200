use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub mod admin;
pub mod common;
pub mod import;
pub mod lifecycle;
pub mod products;
pub mod reports;
pub mod scan;
pub mod system;

/// Router for every inventory endpoint (all state comes from the `AppServices` extension).
pub fn router() -> Router {
    Router::new()
        .route("/", get(products::index))
        .route("/issue/:product_id", get(lifecycle::issue))
        .route("/submit/:issuance_id", get(lifecycle::submit))
        .route("/issuances/:id", get(lifecycle::get_issuance))
        .route("/report", get(reports::report))
        .route("/download_report", get(reports::download_report))
        .route(
            "/import",
            get(import::form)
                .post(import::upload)
                .layer(DefaultBodyLimit::max(import::MAX_UPLOAD_BYTES)),
        )
        .route("/clear", get(admin::clear))
        .route("/add_sample_data", get(admin::add_sample_data))
        .route("/scan", get(scan::page))
        .route("/process_scan", post(scan::process))
        .nest("/products", products::router())
}
