//! Priest entity - the people most ledger records are about.
//!
//! Priests are the subjects of salary, house rent, insurance and loan records,
//! and the targets of individual announcements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Priest database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "priests")]
pub struct Model {
    /// Unique identifier for the priest
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Fr. Thomas Mathew")
    pub name: String,
    /// Contact email, if known
    pub email: Option<String>,
    /// Province the priest belongs to
    pub province_id: Option<i64>,
    /// Inactive priests are kept for history but hidden from pickers
    pub active: bool,
}

/// Defines relationships between Priest and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each priest may belong to one province
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
