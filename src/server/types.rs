use axum::{
    Json,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::booking::genres::GENRE_CATALOGUE;
use crate::booking::search::SearchResult;
use crate::error::BookingError;
use crate::forms::STATE_CODES;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: SearchResult,
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistListItem {
    pub id: i32,
    pub name: String,
}

/// A form ready to be rendered, with the choices its selects offer.
#[derive(Debug, Serialize)]
pub struct FormDocument<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub form: T,
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl<T> FormDocument<T> {
    pub fn blank(form: T) -> Self {
        FormDocument {
            id: None,
            form,
            genres: GENRE_CATALOGUE,
            states: STATE_CODES,
        }
    }

    pub fn editing(id: i32, form: T) -> Self {
        FormDocument {
            id: Some(id),
            ..Self::blank(form)
        }
    }
}

/// Outcome of a successful create, edit or delete.
#[derive(Debug, Serialize)]
pub struct Submission {
    pub id: i32,
    pub message: String,
}

/// A failed submission. Carries the user-facing notice and, for forms, the
/// input exactly as submitted so it can be corrected and resent.
#[derive(Debug)]
pub struct Rejected<T> {
    pub notice: String,
    pub error: BookingError,
    pub input: Option<T>,
}

impl<T> Rejected<T> {
    /// `subject` reads like "Venue The Musical Hop"; `action` like "listed".
    pub fn new(subject: &str, action: &str, error: BookingError, input: Option<T>) -> Self {
        let notice = match error {
            BookingError::Validation(_) => format!(
                "An error occurred. {subject} could not be {action}. Please check your form data and try again"
            ),
            _ => format!("An error occurred. {subject} could not be {action}."),
        };
        Rejected {
            notice,
            error,
            input,
        }
    }
}

impl<T: Serialize> IntoResponse for Rejected<T> {
    fn into_response(self) -> Response {
        match self.error {
            BookingError::Validation(ref errors) => warn!("{} ({errors})", self.notice),
            BookingError::NotFound { .. } => warn!("{} ({})", self.notice, self.error),
            _ => error!("{} ({})", self.notice, self.error),
        }
        let mut body = json!({
            "notice": self.notice,
            "error": self.error.body(),
        });
        if let Some(input) = self.input {
            match serde_json::to_value(input) {
                Ok(input) => body["input"] = input,
                Err(e) => error!("Could not echo submitted input: {e}"),
            }
        }
        (self.error.status(), Json(body)).into_response()
    }
}
