/**
 * Server Initialization
 *
 * Builds the application from a loaded `ServerConfig`:
 *
 * 1. Open the secret store (PostgreSQL, or in-process memory when
 *    `DATABASE_URL=memory`) and apply migrations
 * 2. Wrap the secret key into `TokenKeys`, build the `AuthService` and
 *    precompute the hash used for unknown-user logins
 * 3. Spawn the founder bootstrap loop; a store failure there escalates
 *    through the fatal signal
 * 4. Create the router
 *
 * Unlike request handling, failures here abort startup.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::{
    AuthService, FounderBootstrap, MemoryAccountStore, PasswordHasher, PgAccountStore,
    SecretStore, TokenKeys,
};
use crate::backend::routes::router::create_router;
use crate::backend::error::AuthError;
use crate::backend::server::config::{ConfigError, ServerConfig, StoreBackend};
use crate::backend::server::state::{AppState, FatalSignal};

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to prepare password hasher: {0}")]
    Hasher(#[from] AuthError),
}

/// Open the configured secret store
///
/// # Arguments
/// * `config` - Selects PostgreSQL or the in-process store
///
/// # Returns
/// The store, with migrations applied when it is PostgreSQL
pub async fn load_store(config: &ServerConfig) -> Result<Arc<dyn SecretStore>, InitError> {
    let database_url = match &config.store {
        StoreBackend::Postgres(url) => url,
        StoreBackend::Memory => {
            tracing::warn!("DATABASE_URL=memory. Accounts are lost on restart.");
            return Ok(Arc::new(MemoryAccountStore::new()));
        }
    };

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    tracing::info!("Database connection pool created successfully");

    let store = PgAccountStore::new(pool);
    tracing::info!("Running database migrations...");
    store.migrate().await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(store))
}

/// Build the auth service around an already opened store
///
/// # Arguments
/// * `config` - Loaded server configuration
/// * `store` - Secret store shared with the founder loop
///
/// # Returns
/// A ready service whose unknown-user login path is already warmed up
pub async fn build_auth_service(
    config: &ServerConfig,
    store: Arc<dyn SecretStore>,
) -> Result<AuthService, InitError> {
    let ttl = chrono::Duration::from_std(config.token_ttl).map_err(|_| {
        ConfigError::InvalidValue {
            name: "TOKEN_TTL_SECS",
            value: config.token_ttl.as_secs().to_string(),
        }
    })?;

    let hasher = PasswordHasher::new(config.bcrypt_cost);
    hasher.warm_up().await?;

    Ok(AuthService::new(store, TokenKeys::with_ttl(&config.secret_key, ttl), hasher)
        .with_store_timeout(config.store_timeout))
}

/// Start the founder loop in the background
pub fn spawn_founder_bootstrap(
    config: &ServerConfig,
    store: Arc<dyn SecretStore>,
    fatal: FatalSignal,
) -> tokio::task::JoinHandle<()> {
    let bootstrap = FounderBootstrap::new(
        store,
        PasswordHasher::new(config.bcrypt_cost),
        config.founder_username.clone(),
        config.founder_password.clone(),
    )
    .with_interval(config.founder_recheck);

    tokio::spawn(async move {
        if let Err(e) = bootstrap.run().await {
            fatal.escalate(format!("founder bootstrap failed: {}", e));
        }
    })
}

/// Create and configure the Axum application
///
/// # Arguments
/// * `config` - Loaded server configuration
/// * `fatal` - Signal the founder loop and handlers use to stop the process
///
/// # Returns
/// Configured router, or the first startup failure
pub async fn create_app(config: &ServerConfig, fatal: FatalSignal) -> Result<Router, InitError> {
    tracing::info!("Initializing twirl server");

    let store = load_store(config).await?;
    let auth = build_auth_service(config, store.clone()).await?;

    spawn_founder_bootstrap(config, store, fatal.clone());

    let app = create_router(AppState::new(auth, fatal));
    tracing::info!("Router configured");

    Ok(app)
}
