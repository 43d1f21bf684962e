use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::Config;
use crate::error::WardenError;
use crate::migrations::Migrator;

/// Initialize the database connection from config.
///
/// A one-shot administrative tool needs a small pool; every write is
/// awaited sequentially.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, WardenError> {
    let mut opts = ConnectOptions::new(&config.database_url);
    opts.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.is_dev());

    let db = SeaDatabase::connect(opts).await?;
    Ok(db)
}

/// Run pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), WardenError> {
    tracing::info!("Running pending database migrations...");
    Migrator::up(db, None).await?;
    tracing::info!("Migrations complete.");
    Ok(())
}
