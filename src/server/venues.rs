use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::AppState;
use super::extract::{Id, Submitted};
use super::types::{FormDocument, Rejected, SearchRequest, SearchResponse, Submission};
use crate::booking::detail::{VenueDetail, venue_detail};
use crate::booking::locality::{LocalityGroup, aggregate_by_locality};
use crate::booking::search::search;
use crate::entity::helpers::artists::artists_by_ids;
use crate::entity::helpers::venues as store;
use crate::entity::venues;
use crate::error::{BookingError, BookingResult};
use crate::forms::VenueForm;

pub(super) async fn list_venues(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocalityGroup>>, BookingError> {
    let venues = store::venues_with_shows(&state.db).await?;
    Ok(Json(aggregate_by_locality(&venues, state.now())))
}

pub(super) async fn search_venues(
    State(state): State<AppState>,
    Form(request): Form<SearchRequest>,
) -> Result<Json<SearchResponse>, BookingError> {
    let venues = store::venues_with_shows(&state.db).await?;
    Ok(Json(SearchResponse {
        results: search(&venues, &request.search_term, state.now()),
        search_term: request.search_term,
    }))
}

pub(super) async fn show_venue(
    State(state): State<AppState>,
    Id(venue_id): Id,
) -> Result<Json<VenueDetail>, BookingError> {
    let (venue, shows) = store::venue_with_shows(&state.db, venue_id).await?;
    let artists = artists_by_ids(&state.db, shows.iter().map(|s| s.artist_id)).await?;
    Ok(Json(venue_detail(&venue, &shows, &artists, state.now())))
}

pub(super) async fn create_venue_form() -> Json<FormDocument<VenueForm>> {
    Json(FormDocument::blank(VenueForm::default()))
}

async fn submit_new(
    db: &DatabaseConnection,
    form: BookingResult<VenueForm>,
) -> BookingResult<venues::Model> {
    let fields = form?.validate()?;
    store::create_venue(db, fields).await
}

pub(super) async fn create_venue_submission(
    State(state): State<AppState>,
    submitted: Submitted<VenueForm>,
) -> Result<(StatusCode, Json<Submission>), Rejected<Value>> {
    let subject = submitted.subject("Venue");
    match submit_new(&state.db, submitted.form).await {
        Ok(venue) => Ok((
            StatusCode::CREATED,
            Json(Submission {
                id: venue.id,
                message: format!("{subject} was successfully listed!"),
            }),
        )),
        Err(error) => Err(Rejected::new(&subject, "listed", error, submitted.input)),
    }
}

pub(super) async fn edit_venue(
    State(state): State<AppState>,
    Id(venue_id): Id,
) -> Result<Json<FormDocument<VenueForm>>, BookingError> {
    let venue = store::get_venue(&state.db, venue_id).await?;
    Ok(Json(FormDocument::editing(venue.id, VenueForm::from(&venue))))
}

async fn submit_edit(
    db: &DatabaseConnection,
    venue_id: i32,
    form: BookingResult<VenueForm>,
) -> BookingResult<venues::Model> {
    let fields = form?.validate()?;
    store::update_venue(db, venue_id, fields).await
}

pub(super) async fn edit_venue_submission(
    State(state): State<AppState>,
    Id(venue_id): Id,
    submitted: Submitted<VenueForm>,
) -> Result<Json<Submission>, Rejected<Value>> {
    let subject = submitted.subject("Venue");
    match submit_edit(&state.db, venue_id, submitted.form).await {
        Ok(venue) => Ok(Json(Submission {
            id: venue.id,
            message: format!("{subject} was successfully updated!"),
        })),
        Err(error) => Err(Rejected::new(&subject, "edited", error, submitted.input)),
    }
}

pub(super) async fn delete_venue(
    State(state): State<AppState>,
    Id(venue_id): Id,
) -> Result<Json<Submission>, Rejected<()>> {
    match store::delete_venue(&state.db, venue_id).await {
        Ok(venue) => Ok(Json(Submission {
            id: venue.id,
            message: format!("Venue {} was deleted successfully!", venue.name),
        })),
        Err(error) => Err(Rejected::new("Venue", "deleted", error, None)),
    }
}
