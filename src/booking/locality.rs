use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::search::Summary;
use crate::entity::{shows, venues};

pub type VenueSummary = Summary;

/// Venues sharing one exact (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups appear in order of first occurrence; venues keep input order
/// within their group.
pub fn aggregate_by_locality(
    venues: &[(venues::Model, Vec<shows::Model>)],
    now: NaiveDateTime,
) -> Vec<LocalityGroup> {
    let mut groups: Vec<LocalityGroup> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for (venue, shows) in venues {
        let key = (venue.city.as_str(), venue.state.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(LocalityGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].venues.push(Summary::of(venue, shows, now));
    }
    groups
}
