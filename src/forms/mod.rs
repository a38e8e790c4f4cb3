//! Submitted forms and their validation into store field sets.
//!
//! Validation collects every problem at once and never touches the store;
//! a form that fails here produces `BookingError::Validation`.

mod artist;
mod show;
mod venue;

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

use crate::booking::genres::is_known_genre;
use crate::error::ValidationErrors;

pub const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

const REQUIRED: &str = "This field is required.";

fn required(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn state(errors: &mut ValidationErrors, value: &str) -> String {
    let value = required(errors, "state", value);
    if !value.is_empty() && !STATE_CODES.contains(&value.as_str()) {
        errors.add("state", "Not a valid choice.");
    }
    value
}

fn genres(errors: &mut ValidationErrors, values: &[String]) -> Vec<String> {
    let values: Vec<String> = values
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();
    if values.is_empty() {
        errors.add("genres", REQUIRED);
    }
    for genre in values.iter().filter(|g| !is_known_genre(g)) {
        errors.add("genres", format!("'{genre}' is not a valid choice."));
    }
    values
}

fn link(errors: &mut ValidationErrors, field: &str, value: &str) -> Option<String> {
    let value = optional(value)?;
    let has_host = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| value.strip_prefix(scheme))
        .any(|rest| !rest.is_empty());
    if !has_host {
        errors.add(field, "Invalid URL.");
    }
    Some(value)
}

fn phone(errors: &mut ValidationErrors, value: &str) -> Option<String> {
    let value = optional(value)?;
    let allowed = |c: char| c.is_ascii_digit() || " -()+.".contains(c);
    if !value.chars().all(allowed) || !value.chars().any(|c| c.is_ascii_digit()) {
        errors.add("phone", "Invalid phone number.");
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_flags_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(required(&mut errors, "name", "  The Musical Hop "), "The Musical Hop");
        assert!(errors.is_empty());
        required(&mut errors, "city", "   ");
        assert!(errors.has("city"));
    }

    #[test]
    fn state_must_be_a_known_code() {
        let mut errors = ValidationErrors::new();
        state(&mut errors, "CA");
        assert!(errors.is_empty());
        state(&mut errors, "XX");
        assert!(errors.has("state"));
    }

    #[test]
    fn links_need_a_scheme_and_host() {
        let mut errors = ValidationErrors::new();
        assert_eq!(link(&mut errors, "website_link", ""), None);
        assert_eq!(
            link(&mut errors, "website_link", "https://themusicalhop.com"),
            Some("https://themusicalhop.com".to_string())
        );
        assert!(errors.is_empty());
        link(&mut errors, "facebook_link", "www.facebook.com/hop");
        link(&mut errors, "image_link", "https://");
        assert!(errors.has("facebook_link"));
        assert!(errors.has("image_link"));
    }

    #[test]
    fn phone_accepts_common_punctuation() {
        let mut errors = ValidationErrors::new();
        phone(&mut errors, "(123) 123-1234");
        phone(&mut errors, "+1 415.555.0100");
        assert!(errors.is_empty());
        phone(&mut errors, "call me");
        assert!(errors.has("phone"));
    }

    #[test]
    fn genres_must_come_from_the_catalogue() {
        let mut errors = ValidationErrors::new();
        let kept = genres(&mut errors, &["Jazz".to_string(), " Rock n Roll ".to_string()]);
        assert_eq!(kept, vec!["Jazz", "Rock n Roll"]);
        assert!(errors.is_empty());

        genres(&mut errors, &[]);
        assert!(errors.has("genres"));

        let mut errors = ValidationErrors::new();
        genres(&mut errors, &["Polka".to_string()]);
        assert!(errors.has("genres"));
    }
}
