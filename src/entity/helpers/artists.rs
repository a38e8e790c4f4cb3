use std::collections::HashMap;

use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::distinct_ids;
use crate::booking::genres::join_genres;
use crate::entity::{artists, shows};
use crate::error::{BookingError, BookingResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistFields {
    fn into_active_model(self) -> artists::ActiveModel {
        artists::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            genres: Set(join_genres(&self.genres)),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website_link: Set(self.website_link),
            seeking_venue: Set(self.seeking_venue),
            seeking_description: Set(self.seeking_description),
            ..Default::default()
        }
    }
}

fn not_found(id: i32) -> BookingError {
    BookingError::NotFound {
        entity: "artist",
        id,
    }
}

pub async fn create_artist(
    db: &DatabaseConnection,
    fields: ArtistFields,
) -> BookingResult<artists::Model> {
    let txn = db.begin().await?;
    let artist = fields.into_active_model().insert(&txn).await?;
    txn.commit().await?;
    info!("Artist {} listed with id {}", artist.name, artist.id);
    Ok(artist)
}

pub async fn get_artist(db: &DatabaseConnection, id: i32) -> BookingResult<artists::Model> {
    artists::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    fields: ArtistFields,
) -> BookingResult<artists::Model> {
    let txn = db.begin().await?;
    if artists::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(not_found(id));
    }
    let mut active = fields.into_active_model();
    active.id = Unchanged(id);
    let artist = active.update(&txn).await?;
    txn.commit().await?;
    info!("Artist {} ({}) updated", artist.name, artist.id);
    Ok(artist)
}

pub async fn delete_artist(db: &DatabaseConnection, id: i32) -> BookingResult<artists::Model> {
    let txn = db.begin().await?;
    let artist = artists::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(id))?;
    let removed = shows::Entity::delete_many()
        .filter(shows::Column::ArtistId.eq(id))
        .exec(&txn)
        .await?;
    artists::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(
        "Artist {} ({}) deleted along with {} show(s)",
        artist.name, artist.id, removed.rows_affected
    );
    Ok(artist)
}

pub async fn list_artists(db: &DatabaseConnection) -> BookingResult<Vec<artists::Model>> {
    Ok(artists::Entity::find()
        .order_by_asc(artists::Column::Id)
        .all(db)
        .await?)
}

pub async fn artists_with_shows(
    db: &DatabaseConnection,
) -> BookingResult<Vec<(artists::Model, Vec<shows::Model>)>> {
    Ok(artists::Entity::find()
        .find_with_related(shows::Entity)
        .order_by_asc(artists::Column::Id)
        .order_by_asc(shows::Column::StartTime)
        .all(db)
        .await?)
}

pub async fn artist_with_shows(
    db: &DatabaseConnection,
    id: i32,
) -> BookingResult<(artists::Model, Vec<shows::Model>)> {
    artists::Entity::find_by_id(id)
        .find_with_related(shows::Entity)
        .order_by_asc(shows::Column::StartTime)
        .all(db)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(id))
}

pub async fn artists_by_ids(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i32>,
) -> BookingResult<HashMap<i32, artists::Model>> {
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = artists::Entity::find()
        .filter(artists::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|a| (a.id, a)).collect())
}
