use dms_auth::{KeyFetcher, KeyStore, TenantResolver, TokenVerifier};
use dms_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = dms_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = dms_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting dms-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    dms_db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    // Build the token verifier
    let verifier = if config.auth.insecure_skip_verify {
        warn!("Token signature verification DISABLED - development mode only");
        TokenVerifier::Trusting
    } else {
        let key_store = Arc::new(KeyStore::new());
        let fetcher = KeyFetcher::new(
            &config.auth.keycloak_url,
            &config.auth.realm,
            Arc::clone(&key_store),
        )?;

        // Warm the key cache. A failure here is not fatal: the first
        // request that needs the key retries the fetch.
        match fetcher.fetch().await {
            Ok(()) => info!("Signing key fetched from {}", config.auth.keycloak_url),
            Err(e) => warn!("Initial key fetch failed, will retry on first use: {}", e),
        }

        TokenVerifier::strict(
            key_store,
            fetcher,
            Duration::from_secs(config.auth.key_refresh_secs),
        )
    };

    let resolver = TenantResolver::new(config.auth.tenant_username_fallback);

    let app_state = AppState {
        pool,
        verifier: Arc::new(verifier),
        resolver,
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for SIGINT: {}", e);
            } else {
                info!("Received SIGINT (Ctrl+C), shutting down");
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
