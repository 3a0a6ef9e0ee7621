//! Main entry point for the Escolastico API Gateway

use escolastico_gateway::{api, config::Settings, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .init();

    info!("Starting Escolastico API Gateway");

    // Load configuration
    let settings = Settings::load()?;
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    // One connection-pooling client shared by the forwarder and the health
    // aggregator; its pool drains when the process exits.
    let client = reqwest::Client::builder().build()?;

    let state = Arc::new(AppState::new(settings.clone(), client));

    for (name, base_url) in state.registry.iter() {
        info!(service = %name, base_url = %base_url, "Registered backend");
    }

    // Build the router
    let app = api::routes::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Gateway listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");

    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so in-flight requests finish before the
/// process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
