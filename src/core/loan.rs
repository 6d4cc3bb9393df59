//! Loan ledger - loans to priests, one record per month and loan status.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require, require_discriminator, require_id},
        period::Month,
    },
    entities::loan,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// Loan form. Numeric fields are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanForm {
    pub priest_id: String,
    pub month: String,
    /// Loan status, `"1"` to `"4"`
    pub status: String,
    /// Principal
    pub amount: String,
    pub interest_rate: String,
    pub repayment_amount: String,
    pub notes: Option<String>,
}

impl LedgerForm for LoanForm {
    type Table = loan::Entity;

    fn prepare(self) -> Result<Prepared<loan::ActiveModel>> {
        let priest_id = require_id("priest", &self.priest_id)?;
        let period = require("month", &self.month)?.parse::<Month>()?.first_day();
        let status = require_discriminator(
            "loan status",
            &self.status,
            LedgerCategory::Loan.discriminator_range().unwrap_or((1, 4)),
        )?;
        let amount = coerce_number(require("amount", &self.amount)?);

        Ok(Prepared {
            key: LedgerKey {
                subject_id: Some(priest_id),
                period,
                discriminator: Some(status),
            },
            record: loan::ActiveModel {
                priest_id: Set(priest_id),
                period: Set(period),
                status: Set(status),
                amount: Set(amount),
                interest_rate: Set(coerce_number(&self.interest_rate)),
                repayment_amount: Set(coerce_number(&self.repayment_amount)),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

impl From<&loan::Model> for LoanForm {
    fn from(model: &loan::Model) -> Self {
        Self {
            priest_id: model.priest_id.to_string(),
            month: Month::containing(model.period).to_string(),
            status: model.status.to_string(),
            amount: model.amount.to_string(),
            interest_rate: model.interest_rate.to_string(),
            repayment_amount: model.repayment_amount.to_string(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for loan::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::Loan;

    fn id_column() -> loan::Column {
        loan::Column::Id
    }
    fn period_column() -> loan::Column {
        loan::Column::Period
    }
    fn subject_column() -> Option<loan::Column> {
        Some(loan::Column::PriestId)
    }
    fn discriminator_column() -> Option<loan::Column> {
        Some(loan::Column::Status)
    }
}

impl LedgerRecord for loan::Model {
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
        self.amount
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::ledger;
    use crate::entities::Loan;
    use crate::errors::Error;
    use crate::test_utils::*;

    fn form(priest_id: i64, month: &str, status: &str) -> LoanForm {
        LoanForm {
            priest_id: priest_id.to_string(),
            month: month.to_string(),
            status: status.to_string(),
            amount: "50000".to_string(),
            interest_rate: "7.5".to_string(),
            repayment_amount: "abc".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_loan_fields_are_coerced_and_stored() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Sebastian").await?;

        let entry = ledger::create(&db, form(priest.id, "2024-09", "2")).await?;
        assert_eq!(entry.record.status, 2);
        assert_eq!(entry.record.interest_rate, 7.5);
        assert_eq!(entry.record.repayment_amount, 0.0);

        let loaded = ledger::load_one::<Loan, _>(&db, entry.record.id).await?;
        assert_eq!(LoanForm::from(&loaded.record).status, "2");
        Ok(())
    }

    #[tokio::test]
    async fn test_loan_status_in_key() -> Result<()> {
        let db = setup_test_db().await?;
        let priest = create_test_priest(&db, "Fr. Sebastian").await?;

        ledger::create(&db, form(priest.id, "2024-09", "1")).await?;
        ledger::create(&db, form(priest.id, "2024-09", "4")).await?;
        let again = ledger::create(&db, form(priest.id, "2024-09", "4")).await;
        assert!(matches!(again, Err(Error::DuplicateEntry { .. })));

        let bad = ledger::create(&db, form(priest.id, "2024-09", "5")).await;
        assert!(matches!(bad, Err(Error::Validation { .. })));
        Ok(())
    }
}
