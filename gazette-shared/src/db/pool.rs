/// Database connection pool
///
/// Builds the sqlx Postgres pool the document store runs on. Pool sizing
/// and timeouts come from [`DatabaseConfig`]; the API server fills it from
/// environment variables at startup.
///
/// # Example
///
/// ```no_run
/// use gazette_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// };
///
/// let pool = create_pool(config).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (includes the database name)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to keep open
    pub min_connections: u32,

    /// Timeout for acquiring a connection
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost:5432/gazette".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 10,
        }
    }
}

/// Creates a connection pool from the given configuration
///
/// # Errors
///
/// Returns `sqlx::Error` if the database is unreachable or the URL is
/// malformed.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        max_connections = config.max_connections,
        "creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await?;

    info!("database pool ready");
    Ok(pool)
}

/// Verifies the pool can reach the database
///
/// # Errors
///
/// Returns `sqlx::Error` if the round trip fails.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
