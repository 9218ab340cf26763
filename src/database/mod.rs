use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

pub mod meals;
pub mod models;
pub mod users;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open a pool against `database_url` and run the embedded migrations.
///
/// File-backed databases are created on first use. In-memory databases are
/// pinned to a single connection: every pooled connection would otherwise
/// see its own empty database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DatabaseError> {
    let in_memory = database_url.contains(":memory:");

    let url = if !in_memory && database_url.starts_with("sqlite:") && !database_url.contains('?') {
        format!("{database_url}?mode=rwc")
    } else {
        database_url.to_string()
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory {
            1
        } else {
            crate::config::config().database.max_connections
        })
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Connected database pool for: {}", database_url);
    Ok(pool)
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
