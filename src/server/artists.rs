use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::AppState;
use super::extract::{Id, Submitted};
use super::types::{
    ArtistListItem, FormDocument, Rejected, SearchRequest, SearchResponse, Submission,
};
use crate::booking::detail::{ArtistDetail, artist_detail};
use crate::booking::search::search;
use crate::entity::artists;
use crate::entity::helpers::artists as store;
use crate::entity::helpers::venues::venues_by_ids;
use crate::error::{BookingError, BookingResult};
use crate::forms::ArtistForm;

pub(super) async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArtistListItem>>, BookingError> {
    let artists = store::list_artists(&state.db).await?;
    Ok(Json(
        artists
            .into_iter()
            .map(|a| ArtistListItem {
                id: a.id,
                name: a.name,
            })
            .collect(),
    ))
}

pub(super) async fn search_artists(
    State(state): State<AppState>,
    Form(request): Form<SearchRequest>,
) -> Result<Json<SearchResponse>, BookingError> {
    let artists = store::artists_with_shows(&state.db).await?;
    Ok(Json(SearchResponse {
        results: search(&artists, &request.search_term, state.now()),
        search_term: request.search_term,
    }))
}

pub(super) async fn show_artist(
    State(state): State<AppState>,
    Id(artist_id): Id,
) -> Result<Json<ArtistDetail>, BookingError> {
    let (artist, shows) = store::artist_with_shows(&state.db, artist_id).await?;
    let venues = venues_by_ids(&state.db, shows.iter().map(|s| s.venue_id)).await?;
    Ok(Json(artist_detail(&artist, &shows, &venues, state.now())))
}

pub(super) async fn create_artist_form() -> Json<FormDocument<ArtistForm>> {
    Json(FormDocument::blank(ArtistForm::default()))
}

async fn submit_new(
    db: &DatabaseConnection,
    form: BookingResult<ArtistForm>,
) -> BookingResult<artists::Model> {
    let fields = form?.validate()?;
    store::create_artist(db, fields).await
}

pub(super) async fn create_artist_submission(
    State(state): State<AppState>,
    submitted: Submitted<ArtistForm>,
) -> Result<(StatusCode, Json<Submission>), Rejected<Value>> {
    let subject = submitted.subject("Artist");
    match submit_new(&state.db, submitted.form).await {
        Ok(artist) => Ok((
            StatusCode::CREATED,
            Json(Submission {
                id: artist.id,
                message: format!("{subject} was successfully listed!"),
            }),
        )),
        Err(error) => Err(Rejected::new(&subject, "listed", error, submitted.input)),
    }
}

pub(super) async fn edit_artist(
    State(state): State<AppState>,
    Id(artist_id): Id,
) -> Result<Json<FormDocument<ArtistForm>>, BookingError> {
    let artist = store::get_artist(&state.db, artist_id).await?;
    Ok(Json(FormDocument::editing(artist.id, ArtistForm::from(&artist))))
}

async fn submit_edit(
    db: &DatabaseConnection,
    artist_id: i32,
    form: BookingResult<ArtistForm>,
) -> BookingResult<artists::Model> {
    let fields = form?.validate()?;
    store::update_artist(db, artist_id, fields).await
}

pub(super) async fn edit_artist_submission(
    State(state): State<AppState>,
    Id(artist_id): Id,
    submitted: Submitted<ArtistForm>,
) -> Result<Json<Submission>, Rejected<Value>> {
    let subject = submitted.subject("Artist");
    match submit_edit(&state.db, artist_id, submitted.form).await {
        Ok(artist) => Ok(Json(Submission {
            id: artist.id,
            message: format!("{subject} was successfully updated!"),
        })),
        Err(error) => Err(Rejected::new(&subject, "edited", error, submitted.input)),
    }
}

pub(super) async fn delete_artist(
    State(state): State<AppState>,
    Id(artist_id): Id,
) -> Result<Json<Submission>, Rejected<()>> {
    match store::delete_artist(&state.db, artist_id).await {
        Ok(artist) => Ok(Json(Submission {
            id: artist.id,
            message: format!("Artist {} was deleted successfully!", artist.name),
        })),
        Err(error) => Err(Rejected::new("Artist", "deleted", error, None)),
    }
}
