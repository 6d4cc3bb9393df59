//! Announcement business logic - time-windowed notices for priests.
//!
//! Announcements live in two pools: common ones are shown to every priest,
//! individual ones to a single priest. Both share one table and all of the
//! visibility logic; the pool is derived from `target_priest_id`.
//!
//! Visibility is never stored. An announcement is published while its
//! `visible_until` is unset or not yet in the past, evaluated against the
//! injected [`Clock`] on every read.

use crate::{
    core::{clock::Clock, numeric::require},
    entities::{Announcement, announcement},
    errors::{Error, Result},
};
use chrono::{DateTime, Days, Utc};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use std::{fmt, str::FromStr};
use tracing::{info, instrument, warn};

const SECONDS_PER_DAY: i64 = 86_400;

/// Languages announcements can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    English,
    Malayalam,
    Tamil,
    Hindi,
}

impl Lang {
    /// All supported languages.
    pub const ALL: [Self; 4] = [Self::English, Self::Malayalam, Self::Tamil, Self::Hindi];

    /// ISO 639-1 code stored in the `lang` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Malayalam => "ml",
            Self::Tamil => "ta",
            Self::Hindi => "hi",
        }
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| Error::validation(format!("Unsupported language '{code}'")))
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The two announcement pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Broadcast to all priests
    Common,
    /// Addressed to one priest
    Individual,
}

/// Who an announcement is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Common,
    Individual { priest_id: i64 },
}

impl Audience {
    #[must_use]
    pub const fn of(model: &announcement::Model) -> Self {
        match model.target_priest_id {
            Some(priest_id) => Self::Individual { priest_id },
            None => Self::Common,
        }
    }
}

/// Publication state, derived from `visible_until` and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementStatus {
    Published,
    Expired,
}

/// Announcement form as entered by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementForm {
    pub title: String,
    pub body: String,
    /// Language code, e.g. `"en"`
    pub lang: String,
    /// Days the announcement stays published; blank means it never expires
    pub validity_days: String,
    /// Required for the individual pool, ignored for the common pool
    pub target_priest_id: Option<String>,
}

/// An announcement with its derived publication fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementView {
    pub announcement: announcement::Model,
    pub audience: Audience,
    pub is_published: bool,
    /// Validity window in days as seen from `created_at`
    pub validity_days: Option<i64>,
    pub status: AnnouncementStatus,
}

impl AnnouncementView {
    /// Derives the publication fields as of `now`.
    #[must_use]
    pub fn new(announcement: announcement::Model, now: DateTime<Utc>) -> Self {
        let is_published = is_published(announcement.visible_until, now);
        Self {
            audience: Audience::of(&announcement),
            is_published,
            validity_days: derived_validity_days(
                announcement.created_at,
                announcement.visible_until,
            ),
            status: if is_published {
                AnnouncementStatus::Published
            } else {
                AnnouncementStatus::Expired
            },
            announcement,
        }
    }
}

/// Expiry instant for an announcement created at `created_at`.
///
/// Adds whole calendar days. `None` or a value below 1 means the announcement
/// never expires.
#[must_use]
pub fn compute_visible_until(
    created_at: DateTime<Utc>,
    validity_days: Option<i64>,
) -> Option<DateTime<Utc>> {
    let days = u64::try_from(validity_days?).ok().filter(|days| *days >= 1)?;
    created_at.checked_add_days(Days::new(days))
}

/// Whether an announcement is published at `now`. The boundary is inclusive.
#[must_use]
pub fn is_published(visible_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    visible_until.is_none_or(|until| until >= now)
}

/// Validity in whole days, rounded up; `None` when unset or not positive.
#[must_use]
pub fn derived_validity_days(
    created_at: DateTime<Utc>,
    visible_until: Option<DateTime<Utc>>,
) -> Option<i64> {
    let seconds = (visible_until? - created_at).num_seconds();
    (seconds > 0).then(|| (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY)
}

/// Strictly parses the validity-days input.
///
/// Blank input means no expiry. Anything else must be an integer of at least 1.
pub fn parse_validity_days(input: &str) -> Result<Option<i64>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<i64>() {
        Ok(days) if days >= 1 => Ok(Some(days)),
        _ => Err(Error::validation("Validity days must be at least 1")),
    }
}

/// Expiry for a validated form saved at `now`.
///
/// A validity too large to represent as a date is rejected rather than
/// treated as "never expires".
fn expiry_from(
    now: DateTime<Utc>,
    validity_days: Option<i64>,
) -> Result<Option<DateTime<Utc>>> {
    match validity_days {
        None => Ok(None),
        Some(days) => compute_visible_until(now, Some(days))
            .map(Some)
            .ok_or_else(|| Error::validation(format!("Validity of {days} days is too long"))),
    }
}

struct ValidForm {
    title: String,
    body: String,
    lang: Lang,
    validity_days: Option<i64>,
    target_priest_id: Option<i64>,
}

fn validate(pool: Pool, form: AnnouncementForm) -> Result<ValidForm> {
    let title = require("title", &form.title)?.to_string();
    let lang: Lang = form.lang.parse()?;
    let validity_days = parse_validity_days(&form.validity_days)?;

    let target_priest_id = match pool {
        Pool::Common => None,
        Pool::Individual => {
            let target = form.target_priest_id.as_deref().unwrap_or_default();
            let id = require("target priest", target)?
                .parse()
                .map_err(|_| Error::validation("target priest must be a valid identifier"))?;
            Some(id)
        }
    };

    Ok(ValidForm {
        title,
        body: form.body.trim().to_string(),
        lang,
        validity_days,
        target_priest_id,
    })
}

fn pool_condition(pool: Pool) -> Condition {
    match pool {
        Pool::Common => Condition::all().add(announcement::Column::TargetPriestId.is_null()),
        Pool::Individual => {
            Condition::all().add(announcement::Column::TargetPriestId.is_not_null())
        }
    }
}

async fn find_in_pool<C>(db: &C, pool: Pool, id: i64) -> Result<announcement::Model>
where
    C: ConnectionTrait,
{
    Announcement::find_by_id(id)
        .filter(pool_condition(pool))
        .one(db)
        .await
        .map_err(Error::load_failed)?
        .ok_or(Error::NotFound {
            entity: "announcement",
            id,
        })
}

/// Creates an announcement in `pool`, expiring `validity_days` after now.
#[instrument(skip(db, clock, form))]
pub async fn create<C, K>(
    db: &C,
    clock: &K,
    pool: Pool,
    form: AnnouncementForm,
) -> Result<AnnouncementView>
where
    C: ConnectionTrait,
    K: Clock,
{
    let form = validate(pool, form)?;
    let now = clock.now();
    let visible_until = expiry_from(now, form.validity_days)?;

    let model = announcement::ActiveModel {
        title: Set(form.title),
        body: Set(form.body),
        lang: Set(form.lang.code().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        visible_until: Set(visible_until),
        target_priest_id: Set(form.target_priest_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::save_failed(None, e))?;

    info!(id = model.id, visible_until = ?model.visible_until, "Announcement created");
    Ok(AnnouncementView::new(model, now))
}

/// Replaces an announcement's content.
///
/// The expiry is recomputed from the current time and the newly entered
/// validity, not from `created_at`, which is left unchanged.
#[instrument(skip(db, clock, form))]
pub async fn update<C, K>(
    db: &C,
    clock: &K,
    pool: Pool,
    id: i64,
    form: AnnouncementForm,
) -> Result<AnnouncementView>
where
    C: ConnectionTrait,
    K: Clock,
{
    let form = validate(pool, form)?;
    let existing = find_in_pool(db, pool, id).await?;
    let now = clock.now();
    let visible_until = expiry_from(now, form.validity_days)?;

    let mut active: announcement::ActiveModel = existing.into();
    active.title = Set(form.title);
    active.body = Set(form.body);
    active.lang = Set(form.lang.code().to_string());
    active.updated_at = Set(now);
    active.visible_until = Set(visible_until);
    active.target_priest_id = Set(form.target_priest_id);

    let model = active
        .update(db)
        .await
        .map_err(|e| Error::save_failed(None, e))?;

    info!(id, visible_until = ?model.visible_until, "Announcement updated");
    Ok(AnnouncementView::new(model, now))
}

/// Permanently removes a common announcement.
///
/// Individual announcements can only be edited, never deleted.
#[instrument(skip(db))]
pub async fn delete<C>(db: &C, pool: Pool, id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    if pool == Pool::Individual {
        return Err(Error::validation("Individual announcements cannot be deleted"));
    }

    let existing = find_in_pool(db, pool, id).await?;
    existing
        .delete(db)
        .await
        .map_err(|e| Error::save_failed(None, e))?;

    warn!(id, "Announcement deleted");
    Ok(())
}

/// Loads one announcement from `pool`.
#[instrument(skip(db, clock))]
pub async fn get<C, K>(db: &C, clock: &K, pool: Pool, id: i64) -> Result<AnnouncementView>
where
    C: ConnectionTrait,
    K: Clock,
{
    let model = find_in_pool(db, pool, id).await?;
    Ok(AnnouncementView::new(model, clock.now()))
}

/// All announcements in `pool`, newest first, published or not.
#[instrument(skip(db, clock))]
pub async fn list<C, K>(db: &C, clock: &K, pool: Pool) -> Result<Vec<AnnouncementView>>
where
    C: ConnectionTrait,
    K: Clock,
{
    let now = clock.now();
    let models = Announcement::find()
        .filter(pool_condition(pool))
        .order_by_desc(announcement::Column::CreatedAt)
        .order_by_desc(announcement::Column::Id)
        .all(db)
        .await
        .map_err(Error::load_failed)?;

    Ok(models
        .into_iter()
        .map(|model| AnnouncementView::new(model, now))
        .collect())
}

/// Announcements in `pool` whose title or body contains `query`, ignoring case.
///
/// A blank query returns the whole pool.
#[instrument(skip(db, clock))]
pub async fn search<C, K>(
    db: &C,
    clock: &K,
    pool: Pool,
    query: &str,
) -> Result<Vec<AnnouncementView>>
where
    C: ConnectionTrait,
    K: Clock,
{
    let needle = query.trim().to_lowercase();
    let views = list(db, clock, pool).await?;
    if needle.is_empty() {
        return Ok(views);
    }

    Ok(views
        .into_iter()
        .filter(|view| {
            view.announcement.title.to_lowercase().contains(&needle)
                || view.announcement.body.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Published announcements a priest should see: every common one plus their own.
#[instrument(skip(db, clock))]
pub async fn visible_to_priest<C, K>(
    db: &C,
    clock: &K,
    priest_id: i64,
) -> Result<Vec<AnnouncementView>>
where
    C: ConnectionTrait,
    K: Clock,
{
    let now = clock.now();
    let models = Announcement::find()
        .filter(
            Condition::any()
                .add(announcement::Column::TargetPriestId.is_null())
                .add(announcement::Column::TargetPriestId.eq(priest_id)),
        )
        .order_by_desc(announcement::Column::CreatedAt)
        .order_by_desc(announcement::Column::Id)
        .all(db)
        .await
        .map_err(Error::load_failed)?;

    Ok(models
        .into_iter()
        .map(|model| AnnouncementView::new(model, now))
        .filter(|view| view.is_published)
        .collect())
}
