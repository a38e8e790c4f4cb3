use axum::{Json, extract::State, http::StatusCode};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use super::AppState;
use super::extract::Submitted;
use super::types::{FormDocument, Rejected, Submission};
use crate::booking::detail::{ShowListing, show_listing};
use crate::entity::helpers::artists::artists_by_ids;
use crate::entity::helpers::shows as store;
use crate::entity::helpers::venues::venues_by_ids;
use crate::entity::shows;
use crate::error::{BookingError, BookingResult};
use crate::forms::ShowForm;

pub(super) async fn list_shows(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShowListing>>, BookingError> {
    let shows = store::list_shows(&state.db).await?;
    let venues = venues_by_ids(&state.db, shows.iter().map(|s| s.venue_id)).await?;
    let artists = artists_by_ids(&state.db, shows.iter().map(|s| s.artist_id)).await?;
    Ok(Json(show_listing(&shows, &venues, &artists)))
}

pub(super) async fn create_show_form(State(state): State<AppState>) -> Json<FormDocument<ShowForm>> {
    Json(FormDocument::blank(ShowForm::prefilled(state.now())))
}

async fn submit_new(
    db: &DatabaseConnection,
    form: BookingResult<ShowForm>,
) -> BookingResult<shows::Model> {
    let fields = form?.validate()?;
    store::create_show(db, fields).await
}

pub(super) async fn create_show_submission(
    State(state): State<AppState>,
    submitted: Submitted<ShowForm>,
) -> Result<(StatusCode, Json<Submission>), Rejected<Value>> {
    match submit_new(&state.db, submitted.form).await {
        Ok(show) => Ok((
            StatusCode::CREATED,
            Json(Submission {
                id: show.id,
                message: "Show was successfully listed!".to_string(),
            }),
        )),
        Err(error) => Err(Rejected::new("Show", "listed", error, submitted.input)),
    }
}
