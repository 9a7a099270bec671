use std::path::Path;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, error, info, trace};

pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let database_url = prepare_sqlite_url(database_url)?;

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match Database::connect(&database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

/// For file-backed SQLite URLs, create the parent directory and ask the
/// driver to create the file. Other URLs are returned unchanged.
fn prepare_sqlite_url(database_url: &str) -> Result<String> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(database_url.to_string());
    };

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(database_url.to_string());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(match query {
        Some(query) if query.contains("mode=") => database_url.to_string(),
        Some(query) => format!("sqlite://{}?{}&mode=rwc", path, query),
        None => format!("sqlite://{}?mode=rwc", path),
    })
}
