use chrono::NaiveDateTime;
use serde::Serialize;

use super::Named;
use super::classify::upcoming_count;
use crate::entity::shows;

/// Entry in a listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub id: i32,
    pub name: String,
    #[serde(rename = "num_upcoming_shows")]
    pub upcoming_count: usize,
}

impl Summary {
    pub fn of<E: Named>(entity: &E, shows: &[shows::Model], now: NaiveDateTime) -> Self {
        Summary {
            id: entity.id(),
            name: entity.name().to_string(),
            upcoming_count: upcoming_count(shows, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub count: usize,
    pub data: Vec<Summary>,
}

/// Case-insensitive substring match on the name. An empty term matches
/// everything; matches keep the order they were given in.
pub fn search<E: Named>(
    entities: &[(E, Vec<shows::Model>)],
    term: &str,
    now: NaiveDateTime,
) -> SearchResult {
    let needle = term.to_lowercase();
    let data: Vec<Summary> = entities
        .iter()
        .filter(|(entity, _)| entity.name().to_lowercase().contains(&needle))
        .map(|(entity, shows)| Summary::of(entity, shows, now))
        .collect();
    SearchResult {
        count: data.len(),
        data,
    }
}
