//! Insurance entity - premiums paid per priest, month and insurance type.
//!
//! `insurance_type` is one of five policy kinds (1-5); a priest can hold one
//! record per type per month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Insurance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "insurances")]
pub struct Model {
    /// Unique identifier for the insurance record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Insured priest
    pub priest_id: i64,
    /// Month the premium covers, normalized to the first day
    pub period: Date,
    /// Policy kind, 1 to 5
    pub insurance_type: i32,
    /// Premium paid
    pub amount: f64,
    /// Sum assured by the policy
    pub coverage: f64,
    /// Free-text remarks
    pub notes: Option<String>,
}

/// Defines relationships between Insurance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each insurance record belongs to one priest
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
