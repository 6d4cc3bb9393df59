//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Month-granular ledgers also
//! get a unique index over their (subject, period, discriminator) key.

use crate::core::category::Granularity;
use crate::core::ledger::LedgerTable;
use crate::entities::{
    Announcement, Donation, FundTransfer, HouseRent, Insurance, Loan, Priest, Province, Salary,
};
use crate::errors::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use tracing::{debug, info};

/// Store used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/diocese_portal.sqlite?mode=rwc";

/// Gets the database URL from the environment, falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Local directory a `sqlite://` URL points into, if it has one.
///
/// `SQLite` creates the file on `mode=rwc` but not its parent directory.
#[must_use]
pub fn sqlite_parent_dir(database_url: &str) -> Option<std::path::PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")?
        .split('?')
        .next()
        .filter(|path| !path.is_empty() && !path.starts_with(':'))?;
    std::path::Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(std::path::Path::to_path_buf)
}

/// Establishes a connection to the database named by `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(&dir)?;
    }
    let db = Database::connect(database_url).await?;
    info!("Connected to database");
    Ok(db)
}

/// Unique index over a month-granular ledger's key columns.
///
/// Returns `None` for day-granular ledgers, which allow several records per key.
pub fn ledger_unique_index<E>() -> Option<IndexCreateStatement>
where
    E: LedgerTable,
{
    if E::CATEGORY.granularity() != Granularity::Month {
        return None;
    }

    let mut index = Index::create();
    index
        .name(format!("idx_{}_unique_key", E::CATEGORY))
        .table(E::default())
        .unique()
        .if_not_exists();
    if let Some(subject) = E::subject_column() {
        index.col(subject);
    }
    index.col(E::period_column());
    if let Some(discriminator) = E::discriminator_column() {
        index.col(discriminator);
    }
    Some(index)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    debug!(table = entity.table_name(), "Table ready");
    Ok(())
}

async fn create_ledger_table<E>(db: &DatabaseConnection, schema: &Schema) -> Result<()>
where
    E: LedgerTable,
{
    create_table(db, schema, E::default()).await?;
    if let Some(index) = ledger_unique_index::<E>() {
        let builder = db.get_database_backend();
        db.execute(builder.build(&index)).await?;
    }
    Ok(())
}

/// Creates every table and index the portal needs. Safe to run on an existing store.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    // Referenced tables first so foreign keys resolve.
    create_table(db, &schema, Province).await?;
    create_table(db, &schema, Priest).await?;

    create_ledger_table::<Salary>(db, &schema).await?;
    create_ledger_table::<HouseRent>(db, &schema).await?;
    create_ledger_table::<Insurance>(db, &schema).await?;
    create_ledger_table::<Loan>(db, &schema).await?;
    create_ledger_table::<FundTransfer>(db, &schema).await?;
    create_ledger_table::<Donation>(db, &schema).await?;

    create_table(db, &schema, Announcement).await?;

    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AnnouncementModel, PriestModel, SalaryModel};
    use sea_orm::QuerySelect;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist and are queryable
        let _: Vec<PriestModel> = Priest::find().limit(1).all(&db).await?;
        let _: Vec<SalaryModel> = Salary::find().limit(1).all(&db).await?;
        let _: Vec<AnnouncementModel> = Announcement::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_unique_index_only_for_month_ledgers() {
        assert!(ledger_unique_index::<Salary>().is_some());
        assert!(ledger_unique_index::<Insurance>().is_some());
        assert!(ledger_unique_index::<FundTransfer>().is_none());
        assert!(ledger_unique_index::<Donation>().is_none());
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir(DEFAULT_DATABASE_URL),
            Some(PathBuf::from("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://portal.sqlite"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/portal"), None);
    }
}
