use serde::{Deserialize, Serialize};

use crate::booking::genres::parse_genres;
use crate::entity::artists;
use crate::entity::helpers::artists::ArtistFields;
use crate::error::{BookingResult, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn validate(&self) -> BookingResult<ArtistFields> {
        let mut errors = ValidationErrors::new();
        let fields = ArtistFields {
            name: super::required(&mut errors, "name", &self.name),
            city: super::required(&mut errors, "city", &self.city),
            state: super::state(&mut errors, &self.state),
            phone: super::phone(&mut errors, &self.phone),
            genres: super::genres(&mut errors, &self.genres),
            image_link: super::link(&mut errors, "image_link", &self.image_link),
            facebook_link: super::link(&mut errors, "facebook_link", &self.facebook_link),
            website_link: super::link(&mut errors, "website_link", &self.website_link),
            seeking_venue: self.seeking_venue,
            seeking_description: super::optional(&self.seeking_description),
        };
        errors.finish(fields)
    }
}

impl From<&artists::Model> for ArtistForm {
    fn from(artist: &artists::Model) -> Self {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: parse_genres(&artist.genres),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website_link.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures::artist;
    use crate::error::BookingError;

    #[test]
    fn valid_form_becomes_fields() {
        let form = ArtistForm {
            name: " Guns N Petals ".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: "326-123-5000".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            facebook_link: "https://www.facebook.com/GunsNPetals".to_string(),
            seeking_venue: true,
            seeking_description: "Looking for shows in the Bay Area".to_string(),
            ..Default::default()
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Guns N Petals");
        assert_eq!(fields.phone.as_deref(), Some("326-123-5000"));
        assert_eq!(fields.website_link, None);
        assert!(fields.seeking_venue);
    }

    #[test]
    fn blank_form_is_rejected() {
        let Err(BookingError::Validation(errors)) = ArtistForm::default().validate() else {
            panic!("expected validation failure");
        };
        for field in ["name", "city", "state", "genres"] {
            assert!(errors.has(field), "{field} should be flagged");
        }
    }

    #[test]
    fn prefill_round_trips_through_validation() {
        let stored = artist(4, "Guns N Petals");
        let fields = ArtistForm::from(&stored).validate().unwrap();
        assert_eq!(fields.genres, vec!["Rock n Roll"]);
        assert_eq!(fields.image_link, stored.image_link);
    }
}
