use chrono::NaiveDateTime;
use log::info;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};

use crate::entity::{artists, shows, venues};
use crate::error::{BookingError, BookingResult, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFields {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

/// Books a show. Both ends of the join must exist; that is checked inside the
/// same transaction as the insert.
pub async fn create_show(db: &DatabaseConnection, fields: ShowFields) -> BookingResult<shows::Model> {
    let txn = db.begin().await?;

    let mut errors = ValidationErrors::new();
    if artists::Entity::find_by_id(fields.artist_id)
        .one(&txn)
        .await?
        .is_none()
    {
        errors.add("artist_id", format!("No artist with id {}.", fields.artist_id));
    }
    if venues::Entity::find_by_id(fields.venue_id)
        .one(&txn)
        .await?
        .is_none()
    {
        errors.add("venue_id", format!("No venue with id {}.", fields.venue_id));
    }
    errors.finish(())?;

    let show = shows::ActiveModel {
        artist_id: Set(fields.artist_id),
        venue_id: Set(fields.venue_id),
        start_time: Set(fields.start_time),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;
    info!(
        "Show {} listed: artist {} at venue {} on {}",
        show.id, show.artist_id, show.venue_id, show.start_time
    );
    Ok(show)
}

pub async fn get_show(db: &DatabaseConnection, id: i32) -> BookingResult<shows::Model> {
    shows::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(BookingError::NotFound { entity: "show", id })
}

pub async fn delete_show(db: &DatabaseConnection, id: i32) -> BookingResult<shows::Model> {
    let txn = db.begin().await?;
    let show = shows::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(BookingError::NotFound { entity: "show", id })?;
    shows::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!("Show {id} deleted");
    Ok(show)
}

/// Every show, earliest first.
pub async fn list_shows(db: &DatabaseConnection) -> BookingResult<Vec<shows::Model>> {
    Ok(shows::Entity::find()
        .order_by_asc(shows::Column::StartTime)
        .order_by_asc(shows::Column::Id)
        .all(db)
        .await?)
}
