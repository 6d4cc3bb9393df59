//! Insurance ledger - premiums per priest, month and insurance type.
//!
//! The insurance type (1-5) is part of the uniqueness key, so a priest can have
//! one record per type in the same month.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require, require_discriminator, require_id},
        period::Month,
    },
    entities::insurance,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// Insurance form. Numeric fields are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsuranceForm {
    pub priest_id: String,
    pub month: String,
    /// Policy kind, `"1"` to `"5"`
    pub insurance_type: String,
    /// Premium paid
    pub amount: String,
    pub coverage: String,
    pub notes: Option<String>,
}

impl LedgerForm for InsuranceForm {
    type Table = insurance::Entity;

    fn prepare(self) -> Result<Prepared<insurance::ActiveModel>> {
        let priest_id = require_id("priest", &self.priest_id)?;
        let period = require("month", &self.month)?.parse::<Month>()?.first_day();
        let insurance_type = require_discriminator(
            "insurance type",
            &self.insurance_type,
            LedgerCategory::Insurance.discriminator_range().unwrap_or((1, 5)),
        )?;
        let amount = coerce_number(require("premium", &self.amount)?);

        Ok(Prepared {
            key: LedgerKey {
                subject_id: Some(priest_id),
                period,
                discriminator: Some(insurance_type),
            },
            record: insurance::ActiveModel {
                priest_id: Set(priest_id),
                period: Set(period),
                insurance_type: Set(insurance_type),
                amount: Set(amount),
                coverage: Set(coerce_number(&self.coverage)),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

impl From<&insurance::Model> for InsuranceForm {
    fn from(model: &insurance::Model) -> Self {
        Self {
            priest_id: model.priest_id.to_string(),
            month: Month::containing(model.period).to_string(),
            insurance_type: model.insurance_type.to_string(),
            amount: model.amount.to_string(),
            coverage: model.coverage.to_string(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for insurance::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::Insurance;

    fn id_column() -> insurance::Column {
        insurance::Column::Id
    }
    fn period_column() -> insurance::Column {
        insurance::Column::Period
    }
    fn subject_column() -> Option<insurance::Column> {
        Some(insurance::Column::PriestId)
    }
    fn discriminator_column() -> Option<insurance::Column> {
        Some(insurance::Column::InsuranceType)
    }
}

impl LedgerRecord for insurance::Model {
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
