//! Province entity - receivers of international fund transfers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Province database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provinces")]
pub struct Model {
    /// Unique identifier for the province
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Province name
    pub name: String,
    /// Country the province is located in
    pub country: String,
}

/// Defines relationships between Province and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One province has many priests
    #[sea_orm(has_many = "super::priest::Entity")]
    Priests,
    /// One province receives many fund transfers
    #[sea_orm(has_many = "super::fund_transfer::Entity")]
    FundTransfers,
}

impl Related<super::priest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Priests.def()
    }
}

impl Related<super::fund_transfer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundTransfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
