use axum::{Router, routing::post};
use std::time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{LogFormat, ServerConfig},
    handlers::{AppState, post_crawl},
};

/// Logs go to stderr so `crawl` can print JSON on stdout.
pub fn init_tracing(config: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into());

    match config.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/crawl", post(post_crawl))
        .layer(TraceLayer::new_for_http().on_response(
            |response: &axum::response::Response, latency: Duration, _span: &tracing::Span| {
                info!(
                    "response latency: {:?}, status: {}",
                    latency,
                    response.status()
                );
            },
        ))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("Starting sitecrawl server with config: {:?}", config);

    let app = create_router(AppState {
        settings: config.crawl.clone(),
    });

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to address {}: {}", bind_address, e))?;

    info!("Server running on http://{}", bind_address);
    info!("Configuration options:");
    info!("  HOST: Host to bind to (default: 0.0.0.0)");
    info!("  PORT: Port to bind to (default: 6661)");
    info!("  RUST_LOG or LOG_LEVEL: Log filter");
    info!("  LOG_FORMAT: Log format - 'json' or 'text' (default: text)");
    info!("  MAX_PAGES: Pages fetched per crawl (default: 50)");
    info!("  MAX_DEPTH: Link depth per crawl, seed = 1 (default: 2)");
    info!("  MAX_CONCURRENT_TASKS: Simultaneous fetches (default: 100)");
    info!("  REQUEST_TIMEOUT: Per-fetch timeout in seconds (default: 10)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down sitecrawl server");

    Ok(())
}
