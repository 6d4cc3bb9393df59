//! Salary ledger - monthly pay per priest.
//!
//! One record per priest per month. The summary payout of a record is its net
//! pay: basic amount plus allowance minus deduction.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require, require_id},
        period::Month,
    },
    entities::salary,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// Salary form as entered by an admin. Numeric fields are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryForm {
    pub priest_id: String,
    /// Month paid, `YYYY-MM`
    pub month: String,
    pub amount: String,
    pub allowance: String,
    pub deduction: String,
    pub notes: Option<String>,
}

impl LedgerForm for SalaryForm {
    type Table = salary::Entity;

    fn prepare(self) -> Result<Prepared<salary::ActiveModel>> {
        let priest_id = require_id("priest", &self.priest_id)?;
        let period = require("month", &self.month)?.parse::<Month>()?.first_day();
        let amount = coerce_number(require("amount", &self.amount)?);

        Ok(Prepared {
            key: LedgerKey {
                subject_id: Some(priest_id),
                period,
                discriminator: None,
            },
            record: salary::ActiveModel {
                priest_id: Set(priest_id),
                period: Set(period),
                amount: Set(amount),
                allowance: Set(coerce_number(&self.allowance)),
                deduction: Set(coerce_number(&self.deduction)),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

/// Prefills an edit form from a stored record.
impl From<&salary::Model> for SalaryForm {
    fn from(model: &salary::Model) -> Self {
        Self {
            priest_id: model.priest_id.to_string(),
            month: Month::containing(model.period).to_string(),
            amount: model.amount.to_string(),
            allowance: model.allowance.to_string(),
            deduction: model.deduction.to_string(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for salary::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::Salary;

    fn id_column() -> salary::Column {
        salary::Column::Id
    }
    fn period_column() -> salary::Column {
        salary::Column::Period
    }
    fn subject_column() -> Option<salary::Column> {
        Some(salary::Column::PriestId)
    }
    fn discriminator_column() -> Option<salary::Column> {
        None
    }
}

impl LedgerRecord for salary::Model {
    fn id(&self) -> i64 {
        self.id
    }
    fn subject_id(&self) -> Option<i64> {
        Some(self.priest_id)
    }
    fn period(&self) -> NaiveDate {
        self.period
    }
    fn payout(&self) -> f64 {
        self.amount + self.allowance - self.deduction
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::ledger::{self, DEFAULT_LIST_LIMIT, LedgerFilter};
    use crate::core::period::MonthRange;
    use crate::entities::Salary;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, prelude::*};

    fn form(priest_id: i64, month: &str, amount: &str) -> SalaryForm {
        SalaryForm {
            priest_id: priest_id.to_string(),
            month: month.to_string(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_salary_validation() -> Result<()> {
        // Validation happens before any query, so an empty mock is enough
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let missing_priest = ledger::create(&db, form(1, "2024-03", "100").with_priest("")).await;
        assert!(matches!(missing_priest, Err(Error::Validation { .. })));

        let missing_month = ledger::create(&db, form(1, " ", "100")).await;
        assert!(matches!(missing_month, Err(Error::Validation { .. })));

        let bad_month = ledger::create(&db, form(1, "March", "100")).await;
        assert!(matches!(bad_month, Err(Error::Validation { .. })));

        let missing_amount = ledger::create(&db, form(1, "2024-03", "")).await;
        assert!(matches!(missing_amount, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_salary_returns_subject_name() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;

        let entry = ledger::create(
            &db,
            SalaryForm {
                allowance: "250".to_string(),
                deduction: "50".to_string(),
                notes: Some("  March pay ".to_string()),
                ..form(priest.id, "2024-03", "1000")
            },
        )
        .await?;

        assert_eq!(entry.subject_name.as_deref(), Some("Fr. Antony"));
        assert_eq!(entry.record.period.to_string(), "2024-03-01");
        assert_eq!(entry.record.payout(), 1200.0);
        assert_eq!(entry.record.notes.as_deref(), Some("March pay"));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_salary_is_rejected_without_write() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;

        ledger::create(&db, form(priest.id, "2024-03", "1000")).await?;
        let second = ledger::create(&db, form(priest.id, "2024-03-15", "900")).await;
        assert!(matches!(
            second,
            Err(Error::DuplicateEntry {
                category: LedgerCategory::Salary
            })
        ));

        let rows = Salary::find()
            .filter(salary::Column::PriestId.eq(priest.id))
            .count(&db)
            .await?;
        assert_eq!(rows, 1);

        // Another month for the same priest is fine
        ledger::create(&db, form(priest.id, "2024-04", "1000")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_unique_index_backstops_duplicate_check() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;
        ledger::create(&db, form(priest.id, "2024-03", "1000")).await?;

        // Bypass the pre-check, as a racing submission would
        let Prepared { record, .. } = form(priest.id, "2024-03", "1000").prepare()?;
        let err = record.insert(&db).await.unwrap_err();
        let mapped = Error::save_failed(Some(LedgerCategory::Salary), err);
        assert!(matches!(mapped, Error::DuplicateEntry { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_onto_existing_month_is_rejected_by_unique_index() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;
        ledger::create(&db, form(priest.id, "2024-03", "1000")).await?;
        let april = ledger::create(&db, form(priest.id, "2024-04", "900")).await?;

        let result = ledger::update(&db, april.record.id, form(priest.id, "2024-03", "900")).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateEntry {
                category: LedgerCategory::Salary
            })
        ));

        let unchanged = ledger::load_one::<Salary, _>(&db, april.record.id).await?;
        assert_eq!(unchanged.record, april.record);
        assert_eq!(Month::containing(unchanged.record.period).to_string(), "2024-04");
        assert_eq!(Salary::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_unparsable_optional_numbers_are_stored_as_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;

        let entry = ledger::create(
            &db,
            SalaryForm {
                allowance: "abc".to_string(),
                deduction: "".to_string(),
                ..form(priest.id, "2024-05", "800")
            },
        )
        .await?;
        assert_eq!(entry.record.allowance, 0.0);
        assert_eq!(entry.record.deduction, 0.0);

        // A present but malformed amount passes the presence gate and becomes 0
        let entry = ledger::create(&db, form(priest.id, "2024-06", "eight hundred")).await?;
        assert_eq!(entry.record.amount, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;
        let created = ledger::create(
            &db,
            SalaryForm {
                notes: Some("first".to_string()),
                ..form(priest.id, "2024-03", "1000")
            },
        )
        .await?;

        let loaded = ledger::load_one::<Salary, _>(&db, created.record.id).await?;
        let mut edit = SalaryForm::from(&loaded.record);
        assert_eq!(edit.month, "2024-03");
        assert_eq!(edit.notes.as_deref(), Some("first"));

        edit.amount = "1100".to_string();
        edit.notes = None;
        let updated = ledger::update(&db, created.record.id, edit).await?;
        assert_eq!(updated.record.id, created.record.id);
        assert_eq!(updated.record.amount, 1100.0);
        assert_eq!(updated.record.notes, None);
        assert_eq!(updated.subject_name.as_deref(), Some("Fr. Antony"));

        assert_eq!(Salary::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_load_missing_record() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;

        let result = ledger::update(&db, 404, form(priest.id, "2024-03", "1")).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "salary",
                id: 404
            })
        ));

        let result = ledger::load_one::<Salary, _>(&db, 404).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_for_range_orders_and_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Antony").await?;
        for month in ["2023-12", "2024-01", "2024-02", "2024-03"] {
            ledger::create(&db, form(priest.id, month, "100")).await?;
        }

        let range = MonthRange::parse("2024-01", "2024-02")?;
        let listing =
            ledger::list_for_range::<Salary, _>(&db, range, LedgerFilter::default(), 100).await?;
        let periods: Vec<String> = listing
            .entries
            .iter()
            .map(|e| e.record.period.to_string())
            .collect();
        assert_eq!(periods, ["2024-02-01", "2024-01-01"]);
        assert_eq!(listing.summary.total_payout, 200.0);
        assert_eq!(listing.summary.record_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_for_range_caps_rows_but_not_summary() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..3 {
            let priest = create_test_priest(&db, &format!("Fr. Test {i}")).await?;
            ledger::create(&db, form(priest.id, "2024-01", "10")).await?;
        }

        let range = MonthRange::parse("2024-01", "2024-01")?;
        let listing =
            ledger::list_for_range::<Salary, _>(&db, range, LedgerFilter::default(), 2).await?;
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.summary.total_payout, 30.0);
        assert_eq!(listing.summary.record_count, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_sums_totals_and_takes_max_count() -> Result<()> {
        let db = setup_test_db().await?;
        let mut priests = Vec::new();
        for i in 0..5 {
            priests.push(create_test_priest(&db, &format!("Fr. Test {i}")).await?);
        }

        // January: 3 priests, 100 total. February: 5 priests, 50 total.
        for (priest, amount) in priests.iter().take(3).zip(["40", "30", "30"]) {
            ledger::create(&db, form(priest.id, "2024-01", amount)).await?;
        }
        for priest in &priests {
            ledger::create(&db, form(priest.id, "2024-02", "10")).await?;
        }

        let range = MonthRange::parse("2024-01", "2024-02")?;
        let listing = ledger::list_for_range::<Salary, _>(
            &db,
            range,
            LedgerFilter::default(),
            DEFAULT_LIST_LIMIT,
        )
        .await?;
        assert_eq!(listing.summary.total_payout, 150.0);
        assert_eq!(listing.summary.record_count, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_for_range_by_subject() -> Result<()> {
        let db = setup_test_db().await?;
        let antony = create_test_priest(&db, "Fr. Antony").await?;
        let benny = create_test_priest(&db, "Fr. Benny").await?;
        ledger::create(&db, form(antony.id, "2024-01", "100")).await?;
        ledger::create(&db, form(benny.id, "2024-01", "300")).await?;

        let range = MonthRange::parse("2024-01", "2024-01")?;
        let filter = LedgerFilter {
            subject_id: Some(benny.id),
            ..Default::default()
        };
        let listing = ledger::list_for_range::<Salary, _>(&db, range, filter, 100).await?;
        assert_eq!(listing.entries.len(), 1);
        assert_eq!(listing.entries[0].subject_name.as_deref(), Some("Fr. Benny"));
        assert_eq!(listing.summary.total_payout, 300.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_for_empty_range() -> Result<()> {
        let db = setup_test_db().await?;
        let range = MonthRange::parse("2030-01", "2030-12")?;
        let listing =
            ledger::list_for_range::<Salary, _>(&db, range, LedgerFilter::default(), 100).await?;
        assert!(listing.entries.is_empty());
        assert_eq!(listing.summary, ledger::LedgerSummary::default());
        Ok(())
    }

    impl SalaryForm {
        fn with_priest(mut self, priest_id: &str) -> Self {
            self.priest_id = priest_id.to_string();
            self
        }
    }
}
