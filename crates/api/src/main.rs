use std::sync::Arc;

use anyhow::Context;

use toolcrib_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    toolcrib_observability::init(config.log.format, config.log.filter.as_deref());

    let services = app::services::build_services(&config)
        .await
        .context("failed to open inventory store")?;
    let app = app::build_app(Arc::new(services));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
