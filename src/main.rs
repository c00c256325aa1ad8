use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use logitrack::config::database::DatabaseConfig;
use logitrack::config::EnvironmentConfig;
use logitrack::database::DatabaseConnection;
use logitrack::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 LogiTrack transport management API");

    let config = EnvironmentConfig::from_env()?;

    let state = match config.database_url.clone() {
        Some(url) => {
            let connection = DatabaseConnection::connect(&DatabaseConfig::new(url))
                .await
                .context("Could not connect to PostgreSQL")?;
            connection
                .run_migrations()
                .await
                .context("Could not apply migrations")?;
            AppState::with_postgres(connection.pool().clone(), config.clone())
        }
        None => {
            warn!("⚠️ DATABASE_URL not set, using the in-memory store; data is lost on restart");
            AppState::with_memory_store(config.clone())
        }
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a valid socket address")?;
    info!("🌐 Listening on http://{} ({})", addr, config.environment);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 SIGTERM received, shutting down...");
        },
    }
}
