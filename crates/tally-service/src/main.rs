//! tally service binary.
//!
//! - Config from `tally.yaml` (override with `TALLY_CONFIG`)
//! - Log filter from `RUST_LOG` (default `info`)
//! - Graceful shutdown on Ctrl+C / SIGTERM; `/readyz` reports draining

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::error::{Result, TallyError};
use tally_service::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "tally-service failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = config::resolve_path();
    let cfg = config::load_from_file(&path)?;
    tracing::debug!(%path, "config loaded");
    let listen = cfg.service.listen_addr()?;

    let state = AppState::new(cfg);
    let app = router::build_router(state.clone());

    tracing::info!(%listen, service = state.service_name(), "tally-service starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| TallyError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("tally-service stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    state.set_draining();
    tracing::info!(total_requests = state.counter().request_count(), "signal received, starting graceful shutdown");
}
