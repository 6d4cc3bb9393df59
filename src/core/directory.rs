//! Priests and provinces - the subjects ledger records refer to.
//!
//! Provides creation and lookup for both tables, plus the batched name lookup
//! that stands in for an embedded join when ledger rows are returned.

use crate::{
    core::{category::SubjectKind, numeric::optional_text},
    entities::{Priest, Province, priest, province},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Creates a priest, trimming the name and rejecting blank ones.
#[instrument(skip(db))]
pub async fn create_priest<C>(
    db: &C,
    name: &str,
    email: Option<&str>,
    province_id: Option<i64>,
) -> Result<priest::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Priest name cannot be empty"));
    }

    let model = priest::ActiveModel {
        name: Set(name.to_string()),
        email: Set(optional_text(email)),
        province_id: Set(province_id),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::save_failed(None, e))?;

    info!(id = model.id, name = %model.name, "Priest created");
    Ok(model)
}

/// Creates a province, trimming the name and rejecting blank ones.
#[instrument(skip(db))]
pub async fn create_province<C>(db: &C, name: &str, country: &str) -> Result<province::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Province name cannot be empty"));
    }

    province::ActiveModel {
        name: Set(name.to_string()),
        country: Set(country.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| Error::save_failed(None, e))
}

/// Finds a priest by ID, active or not.
#[instrument(skip(db))]
pub async fn get_priest_by_id<C>(db: &C, priest_id: i64) -> Result<Option<priest::Model>>
where
    C: ConnectionTrait,
{
    Priest::find_by_id(priest_id)
        .one(db)
        .await
        .map_err(Error::load_failed)
}

/// Finds a priest by exact name.
#[instrument(skip(db))]
pub async fn get_priest_by_name<C>(db: &C, name: &str) -> Result<Option<priest::Model>>
where
    C: ConnectionTrait,
{
    Priest::find()
        .filter(priest::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Error::load_failed)
}

/// Finds a province by exact name.
#[instrument(skip(db))]
pub async fn get_province_by_name<C>(db: &C, name: &str) -> Result<Option<province::Model>>
where
    C: ConnectionTrait,
{
    Province::find()
        .filter(province::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Error::load_failed)
}

/// All active priests, ordered by name. Used to fill subject pickers.
#[instrument(skip(db))]
pub async fn list_active_priests<C>(db: &C) -> Result<Vec<priest::Model>>
where
    C: ConnectionTrait,
{
    Priest::find()
        .filter(priest::Column::Active.eq(true))
        .order_by_asc(priest::Column::Name)
        .all(db)
        .await
        .map_err(Error::load_failed)
}

/// All provinces, ordered by name.
#[instrument(skip(db))]
pub async fn list_provinces<C>(db: &C) -> Result<Vec<province::Model>>
where
    C: ConnectionTrait,
{
    Province::find()
        .order_by_asc(province::Column::Name)
        .all(db)
        .await
        .map_err(Error::load_failed)
}

/// Display names for a set of subject IDs, keyed by ID.
///
/// IDs that no longer resolve are simply absent from the map.
#[instrument(skip(db))]
pub async fn subject_names<C>(
    db: &C,
    kind: SubjectKind,
    ids: &[i64],
) -> Result<HashMap<i64, String>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let names: HashMap<i64, String> = match kind {
        SubjectKind::Priest => Priest::find()
            .filter(priest::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
            .map_err(Error::load_failed)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect(),
        SubjectKind::Province => Province::find()
            .filter(province::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
            .map_err(Error::load_failed)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect(),
        SubjectKind::None => HashMap::new(),
    };
    Ok(names)
}
