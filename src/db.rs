//! Connection pool construction and schema migrations.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Which store a process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Disposable database living as long as the pool.
    InMemory,
    /// Durable SQLite database at the given path.
    Sqlite(String),
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("migration error: {0}")]
    Migration(String),
}

/// Applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build a pool over the SQLite database at `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;
    Ok(pool)
}

/// Build a pool over a private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool keeps
/// exactly one connection alive for its whole lifetime.
pub fn establish_in_memory_pool() -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;
    Ok(pool)
}

/// Apply pending embedded migrations.
pub fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))?;
    Ok(())
}

/// Open the configured store with an up-to-date schema.
pub fn open_store(store: &StoreConfig) -> Result<DbPool, DbError> {
    let pool = match store {
        StoreConfig::InMemory => establish_in_memory_pool()?,
        StoreConfig::Sqlite(database_url) => establish_connection_pool(database_url)?,
    };
    run_migrations(&pool)?;
    Ok(pool)
}
