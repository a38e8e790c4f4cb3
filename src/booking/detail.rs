use std::collections::HashMap;

use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;

use super::classify::classify;
use super::genres::parse_genres;
use super::projection::{DisplayRecord, format_start_time, project_skipping_orphans};
use crate::entity::{artists, shows, venues};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<DisplayRecord>,
    pub upcoming_shows: Vec<DisplayRecord>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<DisplayRecord>,
    pub upcoming_shows: Vec<DisplayRecord>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Counts describe the records actually shown, so orphans are not counted.
pub fn venue_detail(
    venue: &venues::Model,
    shows: &[shows::Model],
    artists: &HashMap<i32, artists::Model>,
    now: NaiveDateTime,
) -> VenueDetail {
    let partition = classify(shows, now);
    let past_shows = project_skipping_orphans(partition.past, artists);
    let upcoming_shows = project_skipping_orphans(partition.upcoming, artists);
    VenueDetail {
        id: venue.id,
        name: venue.name.clone(),
        genres: parse_genres(&venue.genres),
        address: venue.address.clone(),
        city: venue.city.clone(),
        state: venue.state.clone(),
        phone: venue.phone.clone(),
        website_link: venue.website_link.clone(),
        facebook_link: venue.facebook_link.clone(),
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description.clone(),
        image_link: venue.image_link.clone(),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub fn artist_detail(
    artist: &artists::Model,
    shows: &[shows::Model],
    venues: &HashMap<i32, venues::Model>,
    now: NaiveDateTime,
) -> ArtistDetail {
    let partition = classify(shows, now);
    let past_shows = project_skipping_orphans(partition.past, venues);
    let upcoming_shows = project_skipping_orphans(partition.upcoming, venues);
    ArtistDetail {
        id: artist.id,
        name: artist.name.clone(),
        genres: parse_genres(&artist.genres),
        city: artist.city.clone(),
        state: artist.state.clone(),
        phone: artist.phone.clone(),
        website_link: artist.website_link.clone(),
        facebook_link: artist.facebook_link.clone(),
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description.clone(),
        image_link: artist.image_link.clone(),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Row of the all-shows listing, joined to both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

pub fn show_listing(
    shows: &[shows::Model],
    venues: &HashMap<i32, venues::Model>,
    artists: &HashMap<i32, artists::Model>,
) -> Vec<ShowListing> {
    shows
        .iter()
        .filter_map(|show| {
            let (Some(venue), Some(artist)) =
                (venues.get(&show.venue_id), artists.get(&show.artist_id))
            else {
                warn!(
                    "Skipping orphaned show {} (artist {}, venue {})",
                    show.id, show.artist_id, show.venue_id
                );
                return None;
            };
            Some(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: format_start_time(show.start_time),
            })
        })
        .collect()
}
