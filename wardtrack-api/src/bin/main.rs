use std::net::SocketAddr;
use std::path::PathBuf;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use wardtrack_api::api::create_application;

/// The main entry point for the WardTrack API server
///
/// This function:
/// 1. Initializes environment variables from a .env file
/// 2. Sets up tracing for logging
/// 3. Ensures the data directory exists
/// 4. Initializes the database connection pool
/// 5. Creates and starts the Axum web application
/// 6. Handles graceful shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(false)
            .with_ansi(true)
            .with_timer(fmt::time::uptime())
            .with_writer(std::io::stdout))
        .with(env_filter)
        .init();

    info!("Starting WardTrack API server");

    // Resolve the SQLite database location
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let db_path = PathBuf::from(&data_dir).join("wardtrack.db");

    // Create the data directory if it doesn't exist
    if !PathBuf::from(&data_dir).exists() {
        info!("Creating data directory: {}", data_dir);
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            error!("Failed to create data directory: {}", e);
            std::process::exit(1);
        }
    }

    // Set DB_SQLITE_PATH environment variable if not already set
    if std::env::var("DB_SQLITE_PATH").is_err() {
        std::env::set_var("DB_SQLITE_PATH", db_path.to_string_lossy().to_string());
        info!("Set DB_SQLITE_PATH to {}", db_path.display());
    }

    // Initialize the database connection pool; on failure the repositories
    // fall back to in-memory storage and the health endpoint reports degraded
    match wardtrack_domain::database::initialize_database_pool() {
        Ok(_) => info!("Database pool initialized successfully"),
        Err(e) => error!("Failed to initialize database pool: {}", e),
    }

    // Create the Axum application with all routes
    let app = create_application().await;

    // Get the port from environment or use default 3000
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    // Create a TCP listener and bind to the address
    let listener = TcpListener::bind(addr).await?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// Waits for either CTRL+C or SIGTERM (on Unix systems); when a signal is
/// received the graceful shutdown process begins.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
