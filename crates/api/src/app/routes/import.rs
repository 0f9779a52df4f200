use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Extension, Multipart},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::app::errors;
use crate::app::routes::common::back_to_index;
use crate::app::services::AppServices;

/// Multipart field carrying the workbook.
pub const FILE_FIELD: &str = "file";

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const IMPORT_FORM: &str = r#"<!doctype html>
<html>
<head><title>Import products</title></head>
<body>
<h1>Import products</h1>
<form method="post" action="/import" enctype="multipart/form-data">
<input type="file" name="file" accept=".xlsx">
<button type="submit">Import</button>
</form>
</body>
</html>
"#;

pub async fn form() -> Html<&'static str> {
    Html(IMPORT_FORM)
}

/// `POST /import`: bulk-create products from an uploaded `.xlsx` workbook.
pub async fn upload(
    Extension(services): Extension<Arc<AppServices>>,
    mut multipart: Multipart,
) -> axum::response::Response {
    let (filename, bytes) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    format!("missing multipart field `{FILE_FIELD}`"),
                );
            }
            Err(e) => return multipart_error_to_response(e),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => break (filename, bytes),
            Err(e) => return multipart_error_to_response(e),
        }
    };

    match services.importer.import_xlsx(&filename, bytes.to_vec()).await {
        Ok(_) => back_to_index().into_response(),
        Err(e) => errors::import_error_to_response(e),
    }
}

fn multipart_error_to_response(err: MultipartError) -> axum::response::Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        errors::json_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            format!("upload exceeds {MAX_UPLOAD_BYTES} bytes"),
        )
    } else {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", err.body_text())
    }
}
