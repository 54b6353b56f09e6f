use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::GatewayError;

pub mod models;
pub mod schema;
mod sqlite;

pub use sqlite::{PortalStorage, SqlitePool};

/// Open the connection pool. Failure here is the one process-fatal error:
/// `main` aborts startup if the database cannot be reached.
pub async fn connect(database_url: &str) -> Result<SqlitePool, GatewayError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}
