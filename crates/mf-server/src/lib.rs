//! mf-server: HTTP API for the movie aggregator.
//!
//! Serves enriched movie listings, search, details and genres as JSON on top
//! of [`mf_engine::MovieService`], together with the static browser UI.
//!
//! - Axum router with request IDs, CORS, tracing and optional rate limiting
//! - OpenAPI document generated with utoipa
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;

use mf_core::config::Config;
use mf_engine::MovieService;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the moviefuse server.
///
/// Builds the [`MovieService`] from configuration and serves the API until a
/// shutdown signal is received.
pub async fn start(config: Config) -> mf_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let movies = MovieService::from_config(&config)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| mf_core::Error::Configuration(format!("Invalid server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| mf_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::new(config, movies);

    serve(listener, ctx, static_dir, CancellationToken::new()).await
}

/// Serve the router on an already bound listener until `cancel` fires or a
/// shutdown signal arrives.
pub async fn serve(
    listener: tokio::net::TcpListener,
    ctx: AppContext,
    static_dir: Option<std::path::PathBuf>,
    cancel: CancellationToken,
) -> mf_core::Result<()> {
    let app = router::build_router(ctx, static_dir);

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Movie server running on http://{addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn start_requires_tmdb_key() {
        let err = start(Config::default()).await.unwrap_err();
        assert!(matches!(err, mf_core::Error::Configuration(_)));
    }

    #[tokio::test]
    async fn serve_stops_on_cancel() {
        let mut config = Config::default();
        config.providers.tmdb.api_key = Some("key".into());
        let movies = MovieService::from_config(&config).unwrap();
        let ctx = AppContext::new(config, movies);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(serve(listener, ctx, None, cancel.clone()));

        cancel.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
