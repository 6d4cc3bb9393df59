//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and creating directory rows
//! with sensible defaults.

use crate::{
    core::{clock::FixedClock, directory},
    entities,
    errors::Result,
};
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an active test priest with no email or province.
pub async fn create_test_priest(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::priest::Model> {
    directory::create_priest(db, name, None, None).await
}

/// Creates a test province in India.
pub async fn create_test_province(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::province::Model> {
    directory::create_province(db, name, "India").await
}

/// A clock frozen at midnight UTC on the given date.
///
/// # Panics
/// Panics if the date does not exist.
#[allow(clippy::unwrap_used)]
pub fn clock_at(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
}
