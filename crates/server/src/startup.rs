use anyhow::Context;
use axum::Router;
use configs::ServerConfig;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{routes, shutdown::Shutdown, state::ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: build the app around a fresh store and serve until a
/// shutdown request or an OS termination signal arrives.
pub async fn run(cfg: &ServerConfig) -> anyhow::Result<()> {
    let shutdown = Shutdown::new();
    let state = ServerState::in_memory(Some(shutdown.clone()));
    let app = routes::build_router(state, build_cors());

    let addr = cfg.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, external = cfg.external, "starting record service");
    serve(listener, app, shutdown).await
}

/// Serve `app` on an already bound listener with graceful shutdown.
pub async fn serve(listener: TcpListener, app: Router, shutdown: Shutdown) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;
    info!(event = "stop", "server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: Shutdown) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        _ = terminate => info!(event = "shutdown_signal", "received SIGTERM, shutting down"),
        _ = shutdown.wait() => info!(event = "shutdown_signal", "shutdown endpoint called, shutting down"),
    }
}
