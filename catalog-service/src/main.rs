use catalog_service::{app, config::Config, services::gateway::HttpGateway, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_service=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let gateway = match HttpGateway::new(
        &config.upstream_url,
        config.upstream_timeout,
        config.upstream_retry,
    ) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Failed to build upstream client: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Using upstream {} (timeout {:?}, retry {})",
        config.upstream_url, config.upstream_timeout, config.upstream_retry
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState {
        config,
        gateway: Arc::new(gateway),
    });

    info!("Catalog service starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app(state)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
