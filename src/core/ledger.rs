//! Ledger business logic shared by every financial category.
//!
//! Salary, house rent, insurance, loan, fund transfer and donation records all
//! go through the functions here. A category plugs in by implementing
//! [`LedgerTable`] for its entity, [`LedgerRecord`] for its model and
//! [`LedgerForm`] for the form that creates or edits it.
//!
//! Month-granular ledgers hold at most one record per (subject, period,
//! discriminator). [`create`] checks for an existing match before inserting;
//! the store's unique index catches whatever slips past that check when two
//! submissions race.

use crate::{
    core::{
        category::{Granularity, LedgerCategory, SubjectKind},
        directory,
        period::{Month, MonthRange},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{IntoActiveModel, QueryOrder, QuerySelect, Select, prelude::*};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, warn};

/// Maximum number of rows returned by a list query unless configured otherwise.
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Binds a SeaORM entity to the shared ledger logic.
pub trait LedgerTable: EntityTrait {
    /// Which ledger this table holds
    const CATEGORY: LedgerCategory;

    /// Primary key column.
    fn id_column() -> Self::Column;
    /// Column holding the normalized month or the record date.
    fn period_column() -> Self::Column;
    /// Column referencing the priest or province, if the ledger has one.
    fn subject_column() -> Option<Self::Column>;
    /// Column holding the secondary key (insurance type, loan status), if any.
    fn discriminator_column() -> Option<Self::Column>;
}

/// Read access to the fields every ledger row has.
pub trait LedgerRecord {
    fn id(&self) -> i64;
    fn subject_id(&self) -> Option<i64>;
    fn period(&self) -> NaiveDate;
    /// Amount this row contributes to the summary total.
    fn payout(&self) -> f64;
}

/// The uniqueness key of a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerKey {
    pub subject_id: Option<i64>,
    pub period: NaiveDate,
    pub discriminator: Option<i32>,
}

/// A validated form, ready to be written.
#[derive(Debug, Clone)]
pub struct Prepared<A> {
    /// Uniqueness key extracted from the form
    pub key: LedgerKey,
    /// Row to insert, or to write over an existing row on update
    pub record: A,
}

/// User input for one ledger category.
///
/// `prepare` checks required fields and coerces optional numbers; it never
/// touches the store.
pub trait LedgerForm {
    /// Table the form writes to
    type Table: LedgerTable;

    /// Validates the input and builds the row to persist.
    fn prepare(self) -> Result<Prepared<<Self::Table as EntityTrait>::ActiveModel>>;
}

/// Optional equality filters applied to list and summary queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Only rows with this insurance type / loan status
    pub discriminator: Option<i32>,
    /// Only rows about this priest or province
    pub subject_id: Option<i64>,
}

/// Totals over a month range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerSummary {
    /// Sum of payouts across all months in range
    pub total_payout: f64,
    /// Largest per-month count of distinct subjects
    pub record_count: u64,
}

/// Per-month subtotal, one per month that has records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total_payout: f64,
    /// Distinct subjects recorded in the month (rows, for subjectless ledgers)
    pub record_count: u64,
}

/// A ledger row together with its subject's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry<M> {
    pub record: M,
    /// Priest or province name; `None` for donations or dangling references
    pub subject_name: Option<String>,
}

/// Result of [`list_for_range`].
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerListing<M> {
    /// Most recent period first, capped at the list limit
    pub entries: Vec<LedgerEntry<M>>,
    /// Summary over the whole range, not just the capped entries
    pub summary: LedgerSummary,
}

/// Folds per-month subtotals into a range summary.
///
/// Totals are summed. The count is the maximum single-month count: a priest
/// paid in three months of the range is still one priest.
#[must_use]
pub fn summarize(totals: &[MonthlyTotal]) -> LedgerSummary {
    totals
        .iter()
        .fold(LedgerSummary::default(), |summary, month| LedgerSummary {
            total_payout: summary.total_payout + month.total_payout,
            record_count: summary.record_count.max(month.record_count),
        })
}

/// Groups rows into per-month subtotals, in ascending month order.
#[must_use]
pub fn monthly_totals_of<R: LedgerRecord>(records: &[R]) -> Vec<MonthlyTotal> {
    #[derive(Default)]
    struct Bucket {
        total: f64,
        subjects: BTreeSet<i64>,
        anonymous: u64,
    }

    let mut buckets: BTreeMap<Month, Bucket> = BTreeMap::new();
    for record in records {
        let bucket = buckets.entry(Month::containing(record.period())).or_default();
        bucket.total += record.payout();
        match record.subject_id() {
            Some(subject) => {
                bucket.subjects.insert(subject);
            }
            None => bucket.anonymous += 1,
        }
    }

    buckets
        .into_iter()
        .map(|(month, bucket)| MonthlyTotal {
            month,
            total_payout: bucket.total,
            record_count: bucket.subjects.len() as u64 + bucket.anonymous,
        })
        .collect()
}

/// Inclusive `period` bounds for a range.
///
/// Month-granular rows sit on day 01, so `[start-01, end-01]` is exact.
/// Dated rows need the whole final month.
fn period_bounds(category: LedgerCategory, range: MonthRange) -> (NaiveDate, NaiveDate) {
    match category.granularity() {
        Granularity::Month => (range.start.first_day(), range.end.first_day()),
        Granularity::Day => (range.start.first_day(), range.end.last_day()),
    }
}

fn filtered_query<E: LedgerTable>(range: MonthRange, filter: LedgerFilter) -> Result<Select<E>> {
    let (from, to) = period_bounds(E::CATEGORY, range);
    let mut query = E::find().filter(E::period_column().between(from, to));

    if let Some(value) = filter.discriminator {
        if let Some(column) = E::discriminator_column() {
            query = query.filter(column.eq(value));
        }
    }

    if let Some(subject) = filter.subject_id {
        let column = E::subject_column().ok_or_else(|| {
            Error::validation(format!("{} records have no subject to filter by", E::CATEGORY))
        })?;
        query = query.filter(column.eq(subject));
    }

    Ok(query)
}

/// Per-month subtotals for a range, the summary source for [`list_for_range`].
#[instrument(skip(db), fields(category = %E::CATEGORY))]
pub async fn monthly_totals<E, C>(
    db: &C,
    range: MonthRange,
    filter: LedgerFilter,
) -> Result<Vec<MonthlyTotal>>
where
    E: LedgerTable,
    E::Model: LedgerRecord,
    C: ConnectionTrait,
{
    let records = filtered_query::<E>(range, filter)?
        .all(db)
        .await
        .map_err(Error::load_failed)?;
    Ok(monthly_totals_of(&records))
}

/// Lists records whose period falls in `range`, newest first, with the range summary.
///
/// The row query and the summary query are read-only and run concurrently.
/// No matching rows yields an empty list and a zeroed summary.
#[instrument(skip(db))]
pub async fn list_for_range<E, C>(
    db: &C,
    range: MonthRange,
    filter: LedgerFilter,
    limit: u64,
) -> Result<LedgerListing<E::Model>>
where
    E: LedgerTable,
    E::Model: LedgerRecord,
    C: ConnectionTrait,
{
    let rows = filtered_query::<E>(range, filter)?
        .order_by_desc(E::period_column())
        .order_by_desc(E::id_column())
        .limit(limit);

    let (records, totals) = tokio::try_join!(
        async { rows.all(db).await.map_err(Error::load_failed) },
        monthly_totals::<E, C>(db, range, filter),
    )?;

    debug!(
        category = %E::CATEGORY,
        rows = records.len(),
        months = totals.len(),
        "Loaded ledger range"
    );

    Ok(LedgerListing {
        entries: with_subject_names(db, E::CATEGORY.subject_kind(), records).await?,
        summary: summarize(&totals),
    })
}

/// Returns whether a record with the same key already exists.
#[instrument(skip(db), fields(category = %E::CATEGORY))]
pub async fn exists<E, C>(db: &C, key: &LedgerKey) -> Result<bool>
where
    E: LedgerTable,
    C: ConnectionTrait,
{
    let mut query = E::find().filter(E::period_column().eq(key.period));
    if let (Some(column), Some(subject)) = (E::subject_column(), key.subject_id) {
        query = query.filter(column.eq(subject));
    }
    if let (Some(column), Some(value)) = (E::discriminator_column(), key.discriminator) {
        query = query.filter(column.eq(value));
    }

    Ok(query
        .one(db)
        .await
        .map_err(Error::load_failed)?
        .is_some())
}

/// Creates a record after checking it does not duplicate an existing one.
///
/// Returns the stored row with its subject's display name. On a duplicate
/// nothing is written.
#[instrument(skip(db, form), fields(category = %E::CATEGORY))]
pub async fn create<E, C, F>(db: &C, form: F) -> Result<LedgerEntry<E::Model>>
where
    E: LedgerTable,
    E::Model: LedgerRecord + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    C: ConnectionTrait,
    F: LedgerForm<Table = E>,
{
    let Prepared { key, record } = form.prepare().inspect_err(|e| debug!(%e, "Rejected form"))?;

    if E::CATEGORY.granularity() == Granularity::Month && exists::<E, C>(db, &key).await? {
        warn!(
            subject_id = ?key.subject_id,
            period = %key.period,
            discriminator = ?key.discriminator,
            "Duplicate ledger record rejected"
        );
        return Err(Error::DuplicateEntry {
            category: E::CATEGORY,
        });
    }

    let model = record
        .insert(db)
        .await
        .map_err(|e| Error::save_failed(Some(E::CATEGORY), e))?;
    info!(id = model.id(), "Ledger record created");

    with_subject_name(db, E::CATEGORY.subject_kind(), model).await
}

/// Overwrites every field of an existing record with the form's values.
///
/// Edits are not re-checked for duplicates; the store's unique index still
/// rejects an edit that collides with another record.
#[instrument(skip(db, form), fields(category = %E::CATEGORY))]
pub async fn update<E, C, F>(db: &C, id: i64, form: F) -> Result<LedgerEntry<E::Model>>
where
    E: LedgerTable,
    E::Model: LedgerRecord + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    C: ConnectionTrait,
    F: LedgerForm<Table = E>,
{
    let Prepared { mut record, .. } = form.prepare()?;
    find_model::<E, C>(db, id).await?;

    record.set(E::id_column(), id.into());
    let model = record
        .update(db)
        .await
        .map_err(|e| Error::save_failed(Some(E::CATEGORY), e))?;
    info!(id, "Ledger record updated");

    with_subject_name(db, E::CATEGORY.subject_kind(), model).await
}

/// Loads one record with all of its fields, e.g. to prefill an edit form.
#[instrument(skip(db), fields(category = %E::CATEGORY))]
pub async fn load_one<E, C>(db: &C, id: i64) -> Result<LedgerEntry<E::Model>>
where
    E: LedgerTable,
    E::Model: LedgerRecord,
    C: ConnectionTrait,
{
    let model = find_model::<E, C>(db, id).await?;
    with_subject_name(db, E::CATEGORY.subject_kind(), model).await
}

async fn find_model<E, C>(db: &C, id: i64) -> Result<E::Model>
where
    E: LedgerTable,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await
        .map_err(Error::load_failed)?
        .ok_or(Error::NotFound {
            entity: E::CATEGORY.as_str(),
            id,
        })
}

async fn with_subject_name<M, C>(db: &C, kind: SubjectKind, record: M) -> Result<LedgerEntry<M>>
where
    M: LedgerRecord,
    C: ConnectionTrait,
{
    let mut entries = with_subject_names(db, kind, vec![record]).await?;
    entries.pop().ok_or(Error::LoadFailed {
        message: "subject lookup returned no entry".to_string(),
    })
}

async fn with_subject_names<M, C>(
    db: &C,
    kind: SubjectKind,
    records: Vec<M>,
) -> Result<Vec<LedgerEntry<M>>>
where
    M: LedgerRecord,
    C: ConnectionTrait,
{
    let ids: Vec<i64> = records
        .iter()
        .filter_map(LedgerRecord::subject_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let names = directory::subject_names(db, kind, &ids).await?;

    Ok(records
        .into_iter()
        .map(|record| LedgerEntry {
            subject_name: record.subject_id().and_then(|id| names.get(&id).cloned()),
            record,
        })
        .collect())
}
