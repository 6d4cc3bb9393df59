//! Fund transfer ledger - international transfers sent to provinces.
//!
//! Transfers are dated, not monthly, and a province may receive several on the
//! same day, so there is no duplicate guard.

use crate::{
    core::{
        category::LedgerCategory,
        ledger::{LedgerForm, LedgerKey, LedgerRecord, LedgerTable, Prepared},
        numeric::{coerce_number, optional_text, require, require_id},
        period::parse_date,
    },
    entities::fund_transfer,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::Set;

/// Fund transfer form. Numeric fields are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundTransferForm {
    pub province_id: String,
    /// Date sent, `YYYY-MM-DD`
    pub date: String,
    /// Amount in base currency
    pub amount: String,
    /// Currency code received by the province, e.g. `"EUR"`
    pub currency: String,
    pub exchange_rate: String,
    pub notes: Option<String>,
}

impl LedgerForm for FundTransferForm {
    type Table = fund_transfer::Entity;

    fn prepare(self) -> Result<Prepared<fund_transfer::ActiveModel>> {
        let province_id = require_id("province", &self.province_id)?;
        let period = parse_date(require("date", &self.date)?)?;
        let amount = coerce_number(require("amount", &self.amount)?);
        let currency = require("currency", &self.currency)?.to_uppercase();

        Ok(Prepared {
            key: LedgerKey {
                subject_id: Some(province_id),
                period,
                discriminator: None,
            },
            record: fund_transfer::ActiveModel {
                province_id: Set(province_id),
                period: Set(period),
                amount: Set(amount),
                currency: Set(currency),
                exchange_rate: Set(coerce_number(&self.exchange_rate)),
                notes: Set(optional_text(self.notes.as_deref())),
                ..Default::default()
            },
        })
    }
}

impl From<&fund_transfer::Model> for FundTransferForm {
    fn from(model: &fund_transfer::Model) -> Self {
        Self {
            province_id: model.province_id.to_string(),
            date: model.period.to_string(),
            amount: model.amount.to_string(),
            currency: model.currency.clone(),
            exchange_rate: model.exchange_rate.to_string(),
            notes: model.notes.clone(),
        }
    }
}

impl LedgerTable for fund_transfer::Entity {
    const CATEGORY: LedgerCategory = LedgerCategory::FundTransfer;

    fn id_column() -> fund_transfer::Column {
        fund_transfer::Column::Id
    }
    fn period_column() -> fund_transfer::Column {
        fund_transfer::Column::Period
    }
    fn subject_column() -> Option<fund_transfer::Column> {
        Some(fund_transfer::Column::ProvinceId)
    }
    fn discriminator_column() -> Option<fund_transfer::Column> {
        None
    }
}

impl LedgerRecord for fund_transfer::Model {
    fn id(&self) -> i64 {
        self.id
    }
    fn subject_id(&self) -> Option<i64> {
        Some(self.province_id)
    }
    fn period(&self) -> NaiveDate {
        self.period
    }
    fn payout(&self) -> f64 {
        self.amount
    }
}
