//! Error taxonomy shared by the store, the booking core and the HTTP layer.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub type BookingResult<T> = Result<T, BookingError>;

#[derive(Debug, Error)]
pub enum BookingError {
    /// A submitted field was missing or malformed. Nothing was written.
    #[error("invalid submission: {0}")]
    Validation(ValidationErrors),

    /// The store rejected a write. The unit of work was rolled back.
    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A show points at an artist or venue that no longer exists.
    #[error("show {show_id} references missing {entity} {id}")]
    MissingCounterpart {
        entity: &'static str,
        id: i32,
        show_id: i32,
    },
}

impl From<DbErr> for BookingError {
    fn from(err: DbErr) -> Self {
        BookingError::Persistence(err.to_string())
    }
}

impl From<ValidationErrors> for BookingError {
    fn from(errors: ValidationErrors) -> Self {
        BookingError::Validation(errors)
    }
}

impl BookingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::Persistence(_) | BookingError::MissingCounterpart { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON error object; store details stay in the log.
    pub fn body(&self) -> serde_json::Value {
        let status = self.status();
        match self {
            BookingError::Validation(errors) => json!({
                "message": "one or more fields are invalid",
                "status": status.as_u16(),
                "fields": errors,
            }),
            BookingError::Persistence(_) => json!({
                "message": "a database error occurred",
                "status": status.as_u16(),
            }),
            other => json!({
                "message": other.to_string(),
                "status": status.as_u16(),
            }),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{self}");
        }
        (status, Json(json!({ "error": self.body() }))).into_response()
    }
}

/// Field name to the messages raised against it, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, BookingError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(BookingError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
