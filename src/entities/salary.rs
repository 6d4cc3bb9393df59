//! Salary entity - one row per priest per month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Salary database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salaries")]
pub struct Model {
    /// Unique identifier for the salary record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Priest the salary was paid to
    pub priest_id: i64,
    /// Month paid, normalized to the first day
    pub period: Date,
    /// Basic pay
    pub amount: f64,
    /// Allowances added on top of basic pay
    pub allowance: f64,
    /// Deductions withheld
    pub deduction: f64,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Defines relationships between Salary and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each salary record belongs to one priest
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
