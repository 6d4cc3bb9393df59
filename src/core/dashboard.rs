//! Read-only view of one priest's month.

use crate::{
    core::{
        announcement::{self, AnnouncementView},
        clock::Clock,
        directory,
        ledger::{self, LedgerFilter, LedgerListing},
        period::{Month, MonthRange},
    },
    entities::{HouseRent, Insurance, Loan, Salary, house_rent, insurance, loan, priest, salary},
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::instrument;

/// Everything a priest sees on their landing page for one month.
#[derive(Debug, Clone)]
pub struct PriestDashboard {
    pub priest: priest::Model,
    pub month: Month,
    pub salary: LedgerListing<salary::Model>,
    pub house_rent: LedgerListing<house_rent::Model>,
    pub insurance: LedgerListing<insurance::Model>,
    pub loan: LedgerListing<loan::Model>,
    /// Published common announcements plus the priest's own
    pub announcements: Vec<AnnouncementView>,
}

/// Builds the dashboard for `priest_id` in `month`.
///
/// Fails with [`Error::NotFound`] if the priest does not exist.
#[instrument(skip(db, clock))]
pub async fn priest_dashboard<C, K>(
    db: &C,
    clock: &K,
    priest_id: i64,
    month: Month,
    limit: u64,
) -> Result<PriestDashboard>
where
    C: ConnectionTrait,
    K: Clock,
{
    let priest = directory::get_priest_by_id(db, priest_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "priest",
            id: priest_id,
        })?;

    let range = MonthRange::single(month);
    let filter = LedgerFilter {
        subject_id: Some(priest_id),
        ..Default::default()
    };

    let (salary, house_rent, insurance, loan, announcements) = tokio::try_join!(
        ledger::list_for_range::<Salary, C>(db, range, filter, limit),
        ledger::list_for_range::<HouseRent, C>(db, range, filter, limit),
        ledger::list_for_range::<Insurance, C>(db, range, filter, limit),
        ledger::list_for_range::<Loan, C>(db, range, filter, limit),
        announcement::visible_to_priest(db, clock, priest_id),
    )?;

    Ok(PriestDashboard {
        priest,
        month,
        salary,
        house_rent,
        insurance,
        loan,
        announcements,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        announcement::{AnnouncementForm, Pool},
        insurance::InsuranceForm,
        ledger::DEFAULT_LIST_LIMIT,
        salary::SalaryForm,
    };
    use crate::test_utils::*;

    fn salary(priest_id: i64, month: &str, amount: &str) -> SalaryForm {
        SalaryForm {
            priest_id: priest_id.to_string(),
            month: month.to_string(),
            amount: amount.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_dashboard_only_shows_own_month() -> Result<()> {
        let db = setup_test_db().await?;
        let clock = clock_at(2024, 3, 15);
        let dominic = create_test_priest(&db, "Fr. Dominic").await?;
        let francis = create_test_priest(&db, "Fr. Francis").await?;

        ledger::create(&db, salary(dominic.id, "2024-03", "1200")).await?;
        ledger::create(&db, salary(dominic.id, "2024-02", "1100")).await?;
        ledger::create(&db, salary(francis.id, "2024-03", "900")).await?;
        ledger::create(
            &db,
            InsuranceForm {
                priest_id: dominic.id.to_string(),
                month: "2024-03".to_string(),
                insurance_type: "2".to_string(),
                amount: "75".to_string(),
                ..Default::default()
            },
        )
        .await?;

        announcement::create(
            &db,
            &clock,
            Pool::Individual,
            AnnouncementForm {
                title: "Dues reminder".to_string(),
                lang: "en".to_string(),
                target_priest_id: Some(francis.id.to_string()),
                ..Default::default()
            },
        )
        .await?;
        announcement::create(
            &db,
            &clock,
            Pool::Common,
            AnnouncementForm {
                title: "Chrism Mass".to_string(),
                lang: "ml".to_string(),
                validity_days: "10".to_string(),
                ..Default::default()
            },
        )
        .await?;

        let month: Month = "2024-03".parse()?;
        let dashboard = priest_dashboard(&db, &clock, dominic.id, month, DEFAULT_LIST_LIMIT).await?;

        assert_eq!(dashboard.priest.id, dominic.id);
        assert_eq!(dashboard.salary.entries.len(), 1);
        assert_eq!(dashboard.salary.summary.total_payout, 1200.0);
        assert_eq!(dashboard.insurance.summary.total_payout, 75.0);
        assert!(dashboard.house_rent.entries.is_empty());
        assert!(dashboard.loan.entries.is_empty());
        assert_eq!(dashboard.announcements.len(), 1);
        assert_eq!(dashboard.announcements[0].announcement.title, "Chrism Mass");
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_unknown_priest() -> Result<()> {
        let db = setup_test_db().await?;
        let clock = clock_at(2024, 3, 15);
        let month: Month = "2024-03".parse()?;

        let result = priest_dashboard(&db, &clock, 404, month, DEFAULT_LIST_LIMIT).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "priest",
                id: 404
            })
        ));
        Ok(())
    }
}
