// ============================================================================
// Portal Server - Entry Point
// File: portal-app/portal-server/src/main.rs
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};

use portal_api::{build_router, AppState};
use portal_infrastructure::{
    create_pool, run_migrations, PgPreferenceRepository, PgTopicRepository, PgUserRepository,
};
use portal_security::{JwtService, LoginRateLimiter};
use portal_shared::config::AppConfig;
use portal_shared::telemetry::init_telemetry;

const LIMITER_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes file logs on drop
    let _log_guard = init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;
    info!("Database connection established.");

    // Security services
    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let login_limiter = Arc::new(LoginRateLimiter::new(
        config.rate_limit.login_per_minute,
        config.rate_limit.login_burst,
    ));
    spawn_limiter_purge(login_limiter.clone());

    // Create App State
    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTopicRepository::new(pool.clone())),
        Arc::new(PgPreferenceRepository::new(pool.clone())),
        jwt,
        login_limiter,
    )
    .with_database(pool);

    let app = build_router(state, &config.app.cors_origin);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

fn spawn_limiter_purge(limiter: Arc<LoginRateLimiter>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            limiter.purge_stale();
            debug!("Login limiter tracking {} clients", limiter.tracked_clients());
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
