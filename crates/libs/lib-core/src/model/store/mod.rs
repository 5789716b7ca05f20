//! # Database Store
//!
//! Connection pool, embedded migrations, repositories and seed data.

// region: --- Modules
pub mod models;
pub mod user_repository;
pub mod role_repository;
pub mod access_repository;
pub mod seed;
// endregion: --- Modules

// region: --- Re-exports
pub use access_repository::AccessRepository;
pub use role_repository::RoleRepository;
pub use seed::seed_database;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../migrations");

/// Create a new SQLite connection pool for `database_url`.
///
/// The database file and its parent directory are created if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    if let Some(db_path) = database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if !db_path.starts_with(":memory:") {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    info!("Created database directory: {:?}", parent);
                }
            }
        }
    }

    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Create a pool over a private in-memory database.
///
/// Every SQLite in-memory connection is its own database, so the pool holds
/// exactly one connection and never recycles it.
pub async fn create_memory_pool() -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    Ok(pool)
}

/// Apply every pending migration, bringing the schema to head.
///
/// Already-applied migrations are skipped, so this is safe to call on every
/// startup.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    debug!("Applying {} embedded migrations", MIGRATOR.iter().count());
    MIGRATOR.run(pool).await
}

/// Versions recorded as successfully applied, in ascending order.
pub async fn applied_migrations(pool: &DbPool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success = 1 ORDER BY version")
        .fetch_all(pool)
        .await
}
// endregion: --- Types and Functions
