//! Database connection module for the WardTrack application
//!
//! Provides a process-wide SQLite connection pool. When the pool is never
//! initialized (unit tests, or a broken environment) the repository layer
//! falls back to in-memory storage.

use std::env;
use std::sync::Arc;
use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::info;

/// Global database pool used throughout the application
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Database connection pool
#[derive(Debug, Clone)]
pub enum DatabasePool {
    /// SQLite connection pool
    #[cfg(feature = "sqlite")]
    SQLite(Arc<r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>>),
}

/// Database error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Database pool already initialized
    #[error("Database pool is already initialized")]
    PoolAlreadyInitialized,

    /// Database pool not initialized
    #[error("Database pool is not initialized")]
    PoolNotInitialized,

    /// Migration error
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Generic(String),
}

impl From<String> for DatabaseError {
    fn from(error: String) -> Self {
        DatabaseError::Generic(error)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub sqlite_path: String,
    /// Connection pool size
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "./data/wardtrack.db".to_string(),
            pool_size: 10,
        }
    }
}

impl DatabaseConfig {
    /// Build the database configuration from environment variables
    pub fn from_env() -> Self {
        let sqlite_path = env::var("DB_SQLITE_PATH")
            .unwrap_or_else(|_| "./data/wardtrack.db".to_string());

        let pool_size = env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        info!("Database configuration: path={}, pool_size={}", sqlite_path, pool_size);

        Self { sqlite_path, pool_size }
    }
}

/// Initialize the global database connection pool and run migrations
#[cfg(feature = "sqlite")]
pub fn initialize_database_pool() -> Result<(), DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::PoolAlreadyInitialized);
    }

    let config = DatabaseConfig::from_env();
    info!("Initializing SQLite pool at {}", config.sqlite_path);

    let manager = r2d2_sqlite::SqliteConnectionManager::file(&config.sqlite_path);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .build(manager)?;

    // Migrations run on a connection from the fresh pool before the pool
    // becomes visible to the repositories
    {
        let conn = pool.get()?;
        super::migrations::run_migrations(&conn).map_err(DatabaseError::Migration)?;
    }

    DB_POOL
        .set(DatabasePool::SQLite(Arc::new(pool)))
        .map_err(|_| DatabaseError::PoolAlreadyInitialized)?;

    Ok(())
}

/// Get the global database connection pool
pub fn get_db_pool() -> Result<DatabasePool, DatabaseError> {
    DB_POOL
        .get()
        .cloned()
        .ok_or(DatabaseError::PoolNotInitialized)
}
