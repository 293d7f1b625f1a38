use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use super::handler::build_router;
use super::state::AppState;
use crate::core::config::AppConfig;
use crate::errors::ClarioError;

/// Binds `0.0.0.0:$PORT` and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig) -> Result<(), ClarioError> {
    info!("Initializing state...");
    let address = format!("0.0.0.0:{}", config.port);
    let state = AppState::from_config(config)?;

    info!(
        dispatcher = ?state.dispatcher,
        "Starting server..."
    );
    let app = build_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ClarioError::ServerError(format!("Failed to bind {address}: {e}")))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
