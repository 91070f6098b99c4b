/**
 * twirl Server Entry Point
 *
 * Loads configuration, starts the Axum server and exits non-zero when a
 * fatal error is escalated.
 */

use tokio::sync::oneshot;

use twirl::backend::server::{create_app, FatalSignal, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let (fatal, mut fatal_rx) = FatalSignal::channel();
    let app = create_app(&config, fatal).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started on {}", addr);

    let (fatal_tx, mut fatal_reason) = oneshot::channel::<String>();
    let shutdown = async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                }
                tracing::info!("Shutdown requested");
            }
            reason = fatal_rx.recv() => {
                let _ = fatal_tx.send(reason);
            }
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    if let Ok(reason) = fatal_reason.try_recv() {
        tracing::error!("Server stopped after fatal error: {}", reason);
        return Err(reason.into());
    }

    tracing::info!("Server stopped");
    Ok(())
}
