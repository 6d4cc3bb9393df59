//! Loan entity - loans extended to priests, tracked per month and status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    /// Unique identifier for the loan record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Borrowing priest
    pub priest_id: i64,
    /// Month of the record, normalized to the first day
    pub period: Date,
    /// Loan status, 1 to 4 (applied, sanctioned, repaying, closed)
    pub status: i32,
    /// Principal amount
    pub amount: f64,
    /// Annual interest rate in percent
    pub interest_rate: f64,
    /// Amount repaid in this month
    pub repayment_amount: f64,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Defines relationships between Loan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each loan record belongs to one priest
    #[sea_orm(
        belongs_to = "super::priest::Entity",
        from = "Column::PriestId",
        to = "super::priest::Column::Id"
    )]
    Priest,
}

impl Related<super::priest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Priest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
