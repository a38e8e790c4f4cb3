use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entity::helpers::shows::ShowFields;
use crate::error::{BookingResult, ValidationErrors};

const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// `start_time` is wall-clock local time, e.g. `2026-05-21 21:30:00`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i32>,
    pub venue_id: Option<i32>,
    pub start_time: String,
}

impl ShowForm {
    pub fn prefilled(now: NaiveDateTime) -> Self {
        ShowForm {
            start_time: now.format(START_TIME_FORMATS[0]).to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> BookingResult<ShowFields> {
        let mut errors = ValidationErrors::new();
        if self.artist_id.is_none() {
            errors.add("artist_id", super::REQUIRED);
        }
        if self.venue_id.is_none() {
            errors.add("venue_id", super::REQUIRED);
        }
        let start_time = super::required(&mut errors, "start_time", &self.start_time);
        let parsed = START_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&start_time, format).ok());
        if parsed.is_none() && !start_time.is_empty() {
            errors.add("start_time", "Not a valid datetime value.");
        }

        match (self.artist_id, self.venue_id, parsed) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowFields {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors.into()),
        }
    }
}
