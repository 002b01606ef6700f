#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect, connect_in_memory};
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Shared Postgres from `DATABASE_URL`; `None` when not configured or `SKIP_DB_TESTS` is set.
pub async fn get_pg_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
