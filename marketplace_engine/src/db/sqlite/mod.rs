mod db;
mod errors;

pub mod contracts;
pub mod jobs;
pub mod profiles;
pub mod reports;

pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
use log::warn;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates an empty database at `url` if there isn't one there already.
pub async fn create_database_if_missing(url: &str) -> Result<(), SqliteDatabaseError> {
    if Sqlite::database_exists(url).await? {
        return Ok(());
    }
    warn!("🗃️ No database found at {url}. Creating a new one.");
    Sqlite::create_database(url).await?;
    Ok(())
}
