//! House rent entity - rent paid on behalf of a priest, one row per month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// House rent database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "house_rents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Priest the rent was paid for
    pub priest_id: i64,
    /// Month covered, normalized to the first day
    pub period: Date,
    /// Rent amount
    pub amount: f64,
    /// Maintenance charges paid with the rent
    pub maintenance: f64,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
