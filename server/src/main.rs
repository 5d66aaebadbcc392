use std::sync::Arc;

use gleif_core::HttpRegistry;
use gleif_server::{AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gleif_server=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let registry = HttpRegistry::new(&config.base_url, config.timeout);
    let state = AppState::new(Arc::new(registry));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, upstream = %config.base_url, "GLEIF proxy listening");
    gleif_server::run(listener, state).await?;
    Ok(())
}
