//! Database migration command.

use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    let db = super::connect(&config).await?;

    println!("Running database migrations...");
    run_migrations(db.pool()).await?;
    output::print_success("All migrations applied successfully.");

    db.close().await;
    Ok(())
}
