//! Migrate subcommand: applies pending embedded migrations and exits.

use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;

use crate::config::Settings;
use crate::db::MIGRATIONS;

pub fn run(settings: &Settings) -> anyhow::Result<()> {
    if settings.database.url.is_empty() {
        anyhow::bail!("database.url is not configured");
    }

    let mut conn = PgConnection::establish(&settings.database.url)
        .map_err(|e| anyhow::anyhow!("Failed to connect for migrations: {}", e))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    if applied.is_empty() {
        tracing::info!("No pending migrations");
    } else {
        for version in &applied {
            tracing::info!(migration = %version, "Applied migration");
        }
    }

    Ok(())
}
