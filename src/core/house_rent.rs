//! House rent ledger - rent paid on behalf of priests, one record per month.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require, require_id},
        period::Month,
    },
    entities::house_rent,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// House rent form. Numeric fields are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseRentForm {
    pub priest_id: String,
    pub month: String,
    pub amount: String,
    pub maintenance: String,
    pub notes: Option<String>,
}

impl LedgerForm for HouseRentForm {
    type Table = house_rent::Entity;

    fn prepare(self) -> Result<Prepared<house_rent::ActiveModel>> {
        let priest_id = require_id("priest", &self.priest_id)?;
        let period = require("month", &self.month)?.parse::<Month>()?.first_day();
        let amount = coerce_number(require("amount", &self.amount)?);

        Ok(Prepared {
            key: LedgerKey {
                subject_id: Some(priest_id),
                period,
                discriminator: None,
            },
            record: house_rent::ActiveModel {
                priest_id: Set(priest_id),
                period: Set(period),
                amount: Set(amount),
                maintenance: Set(coerce_number(&self.maintenance)),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

impl From<&house_rent::Model> for HouseRentForm {
    fn from(model: &house_rent::Model) -> Self {
        Self {
            priest_id: model.priest_id.to_string(),
            month: Month::containing(model.period).to_string(),
            amount: model.amount.to_string(),
            maintenance: model.maintenance.to_string(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for house_rent::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::HouseRent;

    fn id_column() -> house_rent::Column {
        house_rent::Column::Id
    }
    fn period_column() -> house_rent::Column {
        house_rent::Column::Period
    }
    fn subject_column() -> Option<house_rent::Column> {
        Some(house_rent::Column::PriestId)
    }
    fn discriminator_column() -> Option<house_rent::Column> {
        None
    }
}

impl LedgerRecord for house_rent::Model {
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
        self.amount + self.maintenance
    }
}
