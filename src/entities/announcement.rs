//! Announcement entity - time-bounded notices for all priests or for one.
//!
//! A null `target_priest_id` marks a common (broadcast) announcement; a set one
//! marks an individual announcement. `visible_until` is null for announcements
//! that never expire.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Announcement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    /// Unique identifier for the announcement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline shown in lists
    pub title: String,
    /// Announcement text
    #[sea_orm(column_type = "Text")]
    pub body: String,
    /// Language code of title and body (e.g., `"en"`, `"ml"`)
    pub lang: String,
    /// When the announcement was first created; never changes
    pub created_at: DateTimeUtc,
    /// When the announcement was last edited
    pub updated_at: DateTimeUtc,
    /// Expiry instant; `None` means the announcement never expires
    pub visible_until: Option<DateTimeUtc>,
    /// Addressed priest for individual announcements, `None` for common ones
    pub target_priest_id: Option<i64>,
}

/// Defines relationships between Announcement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Individual announcements point at one priest
    #[sea_orm(
        belongs_to = "super::priest::Entity",
        from = "Column::TargetPriestId",
        to = "super::priest::Column::Id"
    )]
    TargetPriest,
}

impl Related<super::priest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetPriest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
