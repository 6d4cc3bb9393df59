use diocese_portal::{
    config::{database, portal},
    core::{
        announcement::{self, Pool},
        clock::{Clock, SystemClock},
        ledger::{self, LedgerFilter, LedgerRecord, LedgerTable},
        period::{Month, MonthRange},
        report::format_ledger_summary,
    },
    entities::{Donation, FundTransfer, HouseRent, Insurance, Loan, Salary},
    errors::Result,
};
use dotenvy::dotenv;
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn log_summary<E>(db: &DatabaseConnection, range: MonthRange, limit: u64) -> Result<()>
where
    E: LedgerTable,
    E::Model: LedgerRecord,
{
    let listing =
        ledger::list_for_range::<E, _>(db, range, LedgerFilter::default(), limit).await?;
    info!("{}", format_ledger_summary(E::CATEGORY, range, &listing.summary));
    Ok(())
}

async fn log_ledger_summaries(
    db: &DatabaseConnection,
    range: MonthRange,
    limit: u64,
) -> Result<()> {
    log_summary::<Salary>(db, range, limit).await?;
    log_summary::<HouseRent>(db, range, limit).await?;
    log_summary::<Insurance>(db, range, limit).await?;
    log_summary::<Loan>(db, range, limit).await?;
    log_summary::<FundTransfer>(db, range, limit).await?;
    log_summary::<Donation>(db, range, limit).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the portal configuration
    let config = portal::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Initialize database
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed provinces and priests from config
    portal::seed_directory(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed directory: {}", e))?;

    // 6. Report on the current month
    let clock = SystemClock;
    let range = MonthRange::single(Month::containing(clock.now().date_naive()));
    log_ledger_summaries(&db, range, config.list_limit).await?;

    let published = announcement::list(&db, &clock, Pool::Common)
        .await?
        .into_iter()
        .chain(announcement::list(&db, &clock, Pool::Individual).await?)
        .filter(|view| view.is_published)
        .count();
    info!(published, at = %clock.now(), "Published announcements");

    Ok(())
}
