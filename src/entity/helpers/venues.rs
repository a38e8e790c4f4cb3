use std::collections::HashMap;

use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::distinct_ids;
use crate::booking::genres::join_genres;
use crate::entity::{shows, venues};
use crate::error::{BookingError, BookingResult};

/// Every mutable venue column, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueFields {
    fn into_active_model(self) -> venues::ActiveModel {
        venues::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            genres: Set(join_genres(&self.genres)),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website_link: Set(self.website_link),
            seeking_talent: Set(self.seeking_talent),
            seeking_description: Set(self.seeking_description),
            ..Default::default()
        }
    }
}

fn not_found(id: i32) -> BookingError {
    BookingError::NotFound { entity: "venue", id }
}

pub async fn create_venue(
    db: &DatabaseConnection,
    fields: VenueFields,
) -> BookingResult<venues::Model> {
    let txn = db.begin().await?;
    let venue = fields.into_active_model().insert(&txn).await?;
    txn.commit().await?;
    info!("Venue {} listed with id {}", venue.name, venue.id);
    Ok(venue)
}

pub async fn get_venue(db: &DatabaseConnection, id: i32) -> BookingResult<venues::Model> {
    venues::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Overwrites every mutable column; nothing is merged.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    fields: VenueFields,
) -> BookingResult<venues::Model> {
    let txn = db.begin().await?;
    if venues::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(not_found(id));
    }
    let mut active = fields.into_active_model();
    active.id = Unchanged(id);
    let venue = active.update(&txn).await?;
    txn.commit().await?;
    info!("Venue {} ({}) updated", venue.name, venue.id);
    Ok(venue)
}

/// Removes the venue and every show booked there.
pub async fn delete_venue(db: &DatabaseConnection, id: i32) -> BookingResult<venues::Model> {
    let txn = db.begin().await?;
    let venue = venues::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| not_found(id))?;
    let removed = shows::Entity::delete_many()
        .filter(shows::Column::VenueId.eq(id))
        .exec(&txn)
        .await?;
    venues::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(
        "Venue {} ({}) deleted along with {} show(s)",
        venue.name, venue.id, removed.rows_affected
    );
    Ok(venue)
}

/// All venues by id, each with its shows by start time.
pub async fn venues_with_shows(
    db: &DatabaseConnection,
) -> BookingResult<Vec<(venues::Model, Vec<shows::Model>)>> {
    Ok(venues::Entity::find()
        .find_with_related(shows::Entity)
        .order_by_asc(venues::Column::Id)
        .order_by_asc(shows::Column::StartTime)
        .all(db)
        .await?)
}

pub async fn venue_with_shows(
    db: &DatabaseConnection,
    id: i32,
) -> BookingResult<(venues::Model, Vec<shows::Model>)> {
    venues::Entity::find_by_id(id)
        .find_with_related(shows::Entity)
        .order_by_asc(shows::Column::StartTime)
        .all(db)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(id))
}

pub async fn venues_by_ids(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i32>,
) -> BookingResult<HashMap<i32, venues::Model>> {
    let ids = distinct_ids(ids);
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = venues::Entity::find()
        .filter(venues::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|v| (v.id, v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures::at;
    use crate::data::dbconnector::test_connection;
    use crate::entity::helpers::artists::create_artist;
    use crate::entity::helpers::fixtures::{artist_fields, show_fields, venue_fields};
    use crate::entity::helpers::shows::{create_show, list_shows};
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn create_then_get_returns_submitted_fields() {
        let db = test_connection().await;
        let fields = venue_fields("The Musical Hop", "San Francisco", "CA");
        let created = create_venue(&db, fields.clone()).await.unwrap();
        let stored = get_venue(&db, created.id).await.unwrap();

        assert_eq!(stored, created);
        assert_eq!(stored.name, fields.name);
        assert_eq!(stored.address, fields.address);
        assert_eq!(stored.genres, "Jazz, Rock n Roll");
        assert_eq!(stored.seeking_description, fields.seeking_description);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let db = test_connection().await;
        let created = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let replacement = VenueFields {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            genres: vec!["Classical".to_string()],
            ..Default::default()
        };
        update_venue(&db, created.id, replacement).await.unwrap();

        let stored = get_venue(&db, created.id).await.unwrap();
        assert_eq!(stored.name, "The Dueling Pianos Bar");
        assert_eq!(stored.genres, "Classical");
        assert_eq!(stored.phone, None);
        assert_eq!(stored.image_link, None);
        assert!(!stored.seeking_talent);
    }

    #[tokio::test]
    async fn update_of_missing_venue_is_not_found() {
        let db = test_connection().await;
        let err = update_venue(&db, 42, venue_fields("X", "Y", "CA"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound { entity: "venue", id: 42 }));
    }

    #[tokio::test]
    async fn delete_cascades_to_shows() {
        let db = test_connection().await;
        let hop = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let park = create_venue(&db, venue_fields("Park Square", "San Francisco", "CA"))
            .await
            .unwrap();
        let band = create_artist(&db, artist_fields("Guns N Petals")).await.unwrap();
        create_show(&db, show_fields(band.id, hop.id, at(20, 20))).await.unwrap();
        create_show(&db, show_fields(band.id, park.id, at(21, 20))).await.unwrap();

        let deleted = delete_venue(&db, hop.id).await.unwrap();
        assert_eq!(deleted.name, "The Musical Hop");
        assert!(matches!(
            get_venue(&db, hop.id).await,
            Err(BookingError::NotFound { .. })
        ));

        let remaining = list_shows(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].venue_id, park.id);
    }

    #[tokio::test]
    async fn failed_delete_rolls_back_the_cascade() {
        let db = test_connection().await;
        let hop = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let band = create_artist(&db, artist_fields("Guns N Petals")).await.unwrap();
        create_show(&db, show_fields(band.id, hop.id, at(20, 20))).await.unwrap();
        db.execute_unprepared(
            "CREATE TRIGGER venues_locked BEFORE DELETE ON venues \
             BEGIN SELECT RAISE(ABORT, 'venues are locked'); END;",
        )
        .await
        .unwrap();

        let err = delete_venue(&db, hop.id).await.unwrap_err();
        assert!(matches!(err, BookingError::Persistence(_)));
        assert!(get_venue(&db, hop.id).await.is_ok());
        assert_eq!(list_shows(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_keeps_the_stored_row() {
        let db = test_connection().await;
        let hop = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        db.execute_unprepared(
            "CREATE TRIGGER venues_frozen BEFORE UPDATE ON venues \
             BEGIN SELECT RAISE(ABORT, 'venues are frozen'); END;",
        )
        .await
        .unwrap();

        let err = update_venue(&db, hop.id, venue_fields("The Dueling Pianos Bar", "New York", "NY"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Persistence(_)));
        assert_eq!(get_venue(&db, hop.id).await.unwrap(), hop);
    }

    #[tokio::test]
    async fn failed_create_leaves_the_store_unchanged() {
        let db = test_connection().await;
        db.execute_unprepared(
            "CREATE TRIGGER venues_full BEFORE INSERT ON venues \
             BEGIN SELECT RAISE(ABORT, 'no more venues'); END;",
        )
        .await
        .unwrap();

        let err = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::Persistence(_)));
        assert!(venues_with_shows(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_venue_is_not_found() {
        let db = test_connection().await;
        assert!(matches!(
            delete_venue(&db, 7).await,
            Err(BookingError::NotFound { entity: "venue", id: 7 })
        ));
    }

    #[tokio::test]
    async fn listing_pairs_each_venue_with_its_shows() {
        let db = test_connection().await;
        let hop = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let quiet = create_venue(&db, venue_fields("Quiet Room", "Boise", "ID"))
            .await
            .unwrap();
        let band = create_artist(&db, artist_fields("Guns N Petals")).await.unwrap();
        create_show(&db, show_fields(band.id, hop.id, at(22, 20))).await.unwrap();
        create_show(&db, show_fields(band.id, hop.id, at(2, 20))).await.unwrap();

        let listing = venues_with_shows(&db).await.unwrap();
        let ids: Vec<i32> = listing.iter().map(|(v, _)| v.id).collect();
        assert_eq!(ids, vec![hop.id, quiet.id]);
        let starts: Vec<_> = listing[0].1.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![at(2, 20), at(22, 20)]);
        assert!(listing[1].1.is_empty());

        let (venue, shows) = venue_with_shows(&db, hop.id).await.unwrap();
        assert_eq!(venue.id, hop.id);
        assert_eq!(shows.len(), 2);
        assert!(venue_with_shows(&db, 999).await.is_err());
    }

    #[tokio::test]
    async fn lookup_by_ids_ignores_unknown_ids() {
        let db = test_connection().await;
        let hop = create_venue(&db, venue_fields("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let found = venues_by_ids(&db, [hop.id, hop.id, 500]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&hop.id));
        assert!(venues_by_ids(&db, []).await.unwrap().is_empty());
    }
}
