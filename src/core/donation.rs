//! Donation ledger - gifts received from free-text senders.
//!
//! Donations have no subject reference, so they cannot be filtered by subject
//! and are never checked for duplicates.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require},
        period::parse_date,
    },
    entities::donation,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// Donation form. The amount is raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationForm {
    /// Sender as written on the receipt
    pub sender: String,
    /// Date received, `YYYY-MM-DD`
    pub date: String,
    pub amount: String,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

impl LedgerForm for DonationForm {
    type Table = donation::Entity;

    fn prepare(self) -> Result<Prepared<donation::ActiveModel>> {
        let sender = require("sender", &self.sender)?.to_string();
        let period = parse_date(require("date", &self.date)?)?;
        let amount = coerce_number(require("amount", &self.amount)?);

        Ok(Prepared {
            key: LedgerKey {
                subject_id: None,
                period,
                discriminator: None,
            },
            record: donation::ActiveModel {
                sender: Set(sender),
                period: Set(period),
                amount: Set(amount),
                purpose: Set(optional_text(self.purpose.as_deref())),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

impl From<&donation::Model> for DonationForm {
    fn from(model: &donation::Model) -> Self {
        Self {
            sender: model.sender.clone(),
            date: model.period.to_string(),
            amount: model.amount.to_string(),
            purpose: model.purpose.clone(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for donation::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::Donation;

    fn id_column() -> donation::Column {
        donation::Column::Id
    }
    fn period_column() -> donation::Column {
        donation::Column::Period
    }
    fn subject_column() -> Option<donation::Column> {
        None
    }
    fn discriminator_column() -> Option<donation::Column> {
        None
    }
}

impl LedgerRecord for donation::Model {
    fn id(&self) -> i64 {
        self.id
    }
    fn subject_id(&self) -> Option<i64> {
        None
    }
    fn period(&self) -> NaiveDate {
        self.period
    }
    fn payout(&self) -> f64 {
        self.amount
    }
}
