use std::collections::HashMap;

use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;

use super::Named;
use crate::entity::{artists, shows, venues};
use crate::error::{BookingError, BookingResult};

/// `MM/DD/YYYY, HH:MM:SS`, 24-hour clock.
pub const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M:%S";

pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// One show as seen from the other side of the artist/venue join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

/// The entity on the far side of a show: the artist when walking a venue's
/// shows, the venue when walking an artist's.
pub trait Counterpart: Named {
    const ENTITY: &'static str;

    /// Foreign key on the show that points at this kind of entity.
    fn key_of(show: &shows::Model) -> i32;

    fn image_link(&self) -> Option<&str>;
}

impl Counterpart for artists::Model {
    const ENTITY: &'static str = "artist";

    fn key_of(show: &shows::Model) -> i32 {
        show.artist_id
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}

impl Counterpart for venues::Model {
    const ENTITY: &'static str = "venue";

    fn key_of(show: &shows::Model) -> i32 {
        show.venue_id
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}

pub fn project<C: Counterpart>(
    show: &shows::Model,
    counterparts: &HashMap<i32, C>,
) -> BookingResult<DisplayRecord> {
    let key = C::key_of(show);
    let counterpart = counterparts
        .get(&key)
        .ok_or(BookingError::MissingCounterpart {
            entity: C::ENTITY,
            id: key,
            show_id: show.id,
        })?;
    Ok(DisplayRecord {
        id: counterpart.id(),
        name: counterpart.name().to_string(),
        image_link: counterpart.image_link().map(str::to_string),
        start_time: format_start_time(show.start_time),
    })
}

/// Projects every show, dropping (and logging) those whose counterpart is
/// gone. A single dangling row must not take the whole page down.
pub fn project_skipping_orphans<'a, C: Counterpart>(
    shows: impl IntoIterator<Item = &'a shows::Model>,
    counterparts: &HashMap<i32, C>,
) -> Vec<DisplayRecord> {
    shows
        .into_iter()
        .filter_map(|show| match project(show, counterparts) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping orphaned show: {e}");
                None
            }
        })
        .collect()
}
