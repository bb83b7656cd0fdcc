use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tabula_api::{create_app, AppState};
use tabula_client::{TabulaClientConfig, TabulaService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bind = std::env::var("TABULA_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = TabulaClientConfig::from_env()?;
    let service = TabulaService::new(config)?;
    info!(model = service.default_model(), "Tabula service configured");

    let app = create_app(Arc::new(AppState { service }));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
