use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use toolcrib_core::DomainError;
use toolcrib_infra::import::ImportError;
use toolcrib_infra::store::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        other => {
            tracing::error!(error = %other, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", other.to_string())
        }
    }
}

pub fn import_error_to_response(err: ImportError) -> axum::response::Response {
    match err {
        ImportError::InvalidFileType(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_file_type", msg)
        }
        ImportError::Spreadsheet(msg) | ImportError::InvalidSheet(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ImportError::Rejected(report) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "import_rejected",
                "message": format!("{} of {} row(s) invalid; nothing imported",
                    report.failures.len(),
                    report.accepted + report.failures.len()),
                "failures": report.failures,
            })),
        )
            .into_response(),
        ImportError::Store(e) => store_error_to_response(e),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
