/// Database migration runner
///
/// Schema bootstrap via sqlx's migration system. The migrations in
/// `migrations/` create the `documents` table and the `view_signatures`
/// table; the indexes themselves are owned by the view sync pass (see
/// [`store::views`](crate::store::views)) so a definition change rebuilds
/// them without a new migration.
///
/// # Example
///
/// ```no_run
/// use gazette_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use gazette_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = std::env::var("DATABASE_URL")?;
/// ensure_database_exists(&url).await?;
///
/// let pool = create_pool(DatabaseConfig { url, ..Default::default() }).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply; the failing migration is
/// rolled back where the statements allow it.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("running database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("database migrations complete");
            Ok(())
        }
        Err(e) => {
            warn!("migration failed: {}", e);
            Err(e)
        }
    }
}

/// Creates the database if it doesn't exist
///
/// Matches the store's create-if-absent startup behavior: pointing the
/// service at a fresh Postgres instance just works.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the caller lacks
/// CREATEDB rights.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    } else {
        debug!("database already exists");
    }

    Ok(())
}
