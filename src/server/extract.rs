use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::not_found_body;
use crate::error::{BookingResult, ValidationErrors};

/// A JSON form body exactly as it arrived, next to the result of decoding it.
/// A body that is not JSON, or a field of the wrong type, decodes to a
/// validation failure so it is answered like any other invalid submission.
pub(super) struct Submitted<T> {
    pub input: Option<Value>,
    pub form: BookingResult<T>,
}

impl<T> Submitted<T> {
    /// "Venue The Musical Hop" when a name was submitted, "Venue" otherwise.
    pub fn subject(&self, kind: &str) -> String {
        match self.input.as_ref().and_then(|input| input.get("name")?.as_str()) {
            Some(name) => format!("{kind} {name}"),
            None => kind.to_string(),
        }
    }
}

impl<S, T> FromRequest<S> for Submitted<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Serialize + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(input)) => Ok(Submitted {
                form: decode(&input),
                input: Some(input),
            }),
            Err(rejection) => {
                let mut errors = ValidationErrors::new();
                errors.add("form", rejection.body_text());
                Ok(Submitted {
                    input: None,
                    form: Err(errors.into()),
                })
            }
        }
    }
}

/// Decodes the whole form, and on failure retries field by field against a
/// blank form so that every offending field is named.
fn decode<T>(input: &Value) -> BookingResult<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    let whole = match serde_json::from_value(input.clone()) {
        Ok(form) => return Ok(form),
        Err(e) => e,
    };
    let mut errors = ValidationErrors::new();
    if let (Value::Object(fields), Ok(Value::Object(blank))) =
        (input, serde_json::to_value(T::default()))
    {
        for (name, value) in fields {
            let mut single = blank.clone();
            single.insert(name.clone(), value.clone());
            if let Err(e) = serde_json::from_value::<T>(Value::Object(single)) {
                errors.add(name, format!("Not a valid value: {e}"));
            }
        }
    }
    if errors.is_empty() {
        errors.add("form", whole.to_string());
    }
    Err(errors.into())
}

/// Numeric id taken from the path. Anything else does not name a page.
pub(super) struct Id(pub i32);

impl<S> FromRequestParts<S> for Id
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Id(id)),
            Err(rejection) => {
                debug!("No page at {}: {}", parts.uri, rejection.body_text());
                Err(not_found_body())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::forms::{ShowForm, VenueForm};
    use serde_json::json;

    #[test]
    fn well_typed_body_decodes() {
        let form: VenueForm = decode(&json!({ "name": "The Musical Hop", "seeking_talent": true })).unwrap();
        assert_eq!(form.name, "The Musical Hop");
        assert!(form.seeking_talent);
    }

    #[test]
    fn every_wrongly_typed_field_is_named() {
        let err = decode::<ShowForm>(&json!({
            "artist_id": "abc",
            "venue_id": [1],
            "start_time": "2026-06-01 20:00:00",
        }))
        .unwrap_err();
        match err {
            BookingError::Validation(errors) => {
                assert!(errors.has("artist_id"));
                assert!(errors.has("venue_id"));
                assert!(!errors.has("start_time"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_that_is_not_an_object_is_a_form_error() {
        let err = decode::<VenueForm>(&json!(["The Musical Hop"])).unwrap_err();
        assert!(matches!(err, BookingError::Validation(ref e) if e.has("form")));
    }

    #[test]
    fn subject_uses_the_submitted_name() {
        let named: Submitted<VenueForm> = Submitted {
            input: Some(json!({ "name": "The Musical Hop" })),
            form: Ok(VenueForm::default()),
        };
        assert_eq!(named.subject("Venue"), "Venue The Musical Hop");
        let unnamed: Submitted<ShowForm> = Submitted {
            input: None,
            form: Ok(ShowForm::default()),
        };
        assert_eq!(unnamed.subject("Show"), "Show");
    }
}
