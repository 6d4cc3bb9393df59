//! Donation entity - gifts received, keyed by date and a free-text sender.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Who sent the donation, as written on the receipt
    pub sender: String,
    /// Date received
    pub period: Date,
    pub amount: f64,
    /// What the donation was given for
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

/// Donations reference no other table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
