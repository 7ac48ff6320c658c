//! User Accounts service binary
//!
//! Wires configuration, the database pool, and the router together, then
//! serves until SIGINT/SIGTERM.

use anyhow::Result;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_accounts_backend::{config, db, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production = config::AppConfig::is_production(),
        "Starting user accounts service"
    );

    if config::AppConfig::is_production() {
        ensure_production_secret(&config)?;
    }

    let pool = db::connect(&config.database).await?;
    db::run_migrations(&pool).await?;

    let addr = config.server.bind_addr();
    let app = routes::create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "user_accounts_backend=debug,tower_http=info,sqlx=warn".into());

    let registry = tracing_subscriber::registry().with(filter);

    // JSON output in production for log aggregation, plain text otherwise
    if config::AppConfig::is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// The signing secret must be externally supplied in production; refuse to
/// start with the development default or anything too short to sign with.
fn ensure_production_secret(config: &config::AppConfig) -> Result<()> {
    let secret = &config.auth.token_secret;
    if secret.contains("development") || secret.len() < 32 {
        anyhow::bail!(
            "token secret must be externally configured and at least 32 characters in production"
        );
    }
    Ok(())
}

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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
