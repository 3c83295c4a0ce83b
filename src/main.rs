//! odoo-browser server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odoo_browser::http::{build_router, AppState};
use odoo_browser::render::Pages;
use odoo_browser::{AppConfig, JsonRpcTransport, OdooClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odoo_browser=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    tracing::info!(
        server = %config.odoo.server,
        database = %config.odoo.database,
        username = %config.odoo.username,
        "starting odoo-browser"
    );

    let transport = Arc::new(JsonRpcTransport::new(&config.odoo.server)?);
    let client = Arc::new(OdooClient::new(transport, config.odoo.clone()));
    let pages = Arc::new(Pages::new()?);

    let app = build_router(AppState::new(client, pages));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
