use axum::{extract::Form, response::Html};

use crate::app::dto;

const SCAN_PAGE: &str = r#"<!doctype html>
<html>
<head><title>Scan</title></head>
<body>
<h1>Scan</h1>
<form method="post" action="/process_scan">
<input type="text" name="scanned_data" autofocus>
<button type="submit">Submit</button>
</form>
</body>
</html>
"#;

pub async fn page() -> Html<&'static str> {
    Html(SCAN_PAGE)
}

/// `POST /process_scan`: echo the scanned value; nothing is stored.
pub async fn process(Form(form): Form<dto::ScanForm>) -> String {
    tracing::debug!(len = form.scanned_data.len(), "scan received");
    format!("Scanned Data: {}", form.scanned_data)
}
