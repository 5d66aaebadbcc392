use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_MOCK_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse::<u16>()?,
        Err(_) => DEFAULT_MOCK_PORT,
    };
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving registry fixtures");
    mock_registry::run(listener).await?;
    Ok(())
}
