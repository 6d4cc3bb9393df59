//! Fund transfer entity - international transfers sent to a province.
//!
//! Transfers are dated rather than monthly, so a province can receive several
//! on the same day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fund transfer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fund_transfers")]
pub struct Model {
    /// Unique identifier for the transfer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Receiving province
    pub province_id: i64,
    /// Date the transfer was sent
    pub period: Date,
    /// Amount in base currency
    pub amount: f64,
    /// Currency the province received, e.g. "EUR"
    pub currency: String,
    /// Exchange rate applied, base currency per unit of `currency`
    pub exchange_rate: f64,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Defines relationships between FundTransfer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transfer goes to one province
    #[sea_orm(
        belongs_to = "super::province::Entity",
        from = "Column::ProvinceId",
        to = "super::province::Column::Id"
    )]
    Province,
}

impl Related<super::province::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Province.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
