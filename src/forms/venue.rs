use serde::{Deserialize, Serialize};

use crate::booking::genres::parse_genres;
use crate::entity::helpers::venues::VenueFields;
use crate::entity::venues;
use crate::error::{BookingResult, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn validate(&self) -> BookingResult<VenueFields> {
        let mut errors = ValidationErrors::new();
        let fields = VenueFields {
            name: super::required(&mut errors, "name", &self.name),
            city: super::required(&mut errors, "city", &self.city),
            state: super::state(&mut errors, &self.state),
            address: super::required(&mut errors, "address", &self.address),
            phone: super::phone(&mut errors, &self.phone),
            genres: super::genres(&mut errors, &self.genres),
            image_link: super::link(&mut errors, "image_link", &self.image_link),
            facebook_link: super::link(&mut errors, "facebook_link", &self.facebook_link),
            website_link: super::link(&mut errors, "website_link", &self.website_link),
            seeking_talent: self.seeking_talent,
            seeking_description: super::optional(&self.seeking_description),
        };
        errors.finish(fields)
    }
}

impl From<&venues::Model> for VenueForm {
    fn from(venue: &venues::Model) -> Self {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: parse_genres(&venue.genres),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website_link.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}
