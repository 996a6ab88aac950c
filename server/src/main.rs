mod app;
mod config;
mod error;
mod pin_store;
mod routes;
mod state;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::pin_store::PinStore;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pins_path = config::pinned_players_path();
    let pins = PinStore::load(pins_path).await;
    tracing::info!(
        path = %pins.path().display(),
        pinned = pins.pinned().len(),
        "Pin store ready"
    );

    let state = AppState::new(pins);
    let static_dir = config::static_dir();
    if !static_dir.is_dir() {
        tracing::warn!(static_dir = %static_dir.display(), "static directory not found, only the API will be served");
    }
    let app = app::build_app(state, static_dir);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("FPL stats server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
