use chrono::NaiveDateTime;

use crate::entity::shows;

/// Anything with a start time that can be split into past and upcoming.
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for shows::Model {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

/// Shows split around a reference instant, each side in input order.
#[derive(Debug)]
pub struct Partition<'a, S> {
    pub past: Vec<&'a S>,
    pub upcoming: Vec<&'a S>,
}

impl<S> Partition<'_, S> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// A show starting exactly at `now` lands in neither side.
pub fn classify<S: Scheduled>(shows: &[S], now: NaiveDateTime) -> Partition<'_, S> {
    let mut partition = Partition {
        past: Vec::new(),
        upcoming: Vec::new(),
    };
    for show in shows {
        let start = show.start_time();
        if start < now {
            partition.past.push(show);
        } else if start > now {
            partition.upcoming.push(show);
        }
    }
    partition
}

pub fn upcoming_count<S: Scheduled>(shows: &[S], now: NaiveDateTime) -> usize {
    classify(shows, now).upcoming_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::fixtures::{at, now, show};

    #[test]
    fn splits_around_now() {
        let shows = vec![
            show(1, 1, 1, at(1, 20)),
            show(2, 1, 1, at(20, 20)),
            show(3, 1, 1, at(14, 23)),
            show(4, 1, 1, at(16, 1)),
        ];
        let partition = classify(&shows, now());
        let past: Vec<i32> = partition.past.iter().map(|s| s.id).collect();
        let upcoming: Vec<i32> = partition.upcoming.iter().map(|s| s.id).collect();
        assert_eq!(past, vec![1, 3]);
        assert_eq!(upcoming, vec![2, 4]);
        assert_eq!(partition.past_count() + partition.upcoming_count(), shows.len());
    }

    #[test]
    fn keeps_input_order_instead_of_sorting() {
        let shows = vec![
            show(1, 1, 1, at(30, 0)),
            show(2, 1, 1, at(16, 0)),
            show(3, 1, 1, at(25, 0)),
        ];
        let ids: Vec<i32> = classify(&shows, now()).upcoming.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn show_starting_exactly_now_is_neither_past_nor_upcoming() {
        let shows = vec![show(1, 1, 1, now()), show(2, 1, 1, at(1, 0))];
        let partition = classify(&shows, now());
        assert_eq!(partition.past_count(), 1);
        assert_eq!(partition.upcoming_count(), 0);
        assert!(partition.past_count() + partition.upcoming_count() < shows.len());
        assert_eq!(upcoming_count(&shows, now()), 0);
    }

    #[test]
    fn empty_input_yields_empty_partitions() {
        let shows: Vec<shows::Model> = Vec::new();
        let partition = classify(&shows, now());
        assert!(partition.past.is_empty());
        assert!(partition.upcoming.is_empty());
    }

    #[test]
    fn upcoming_count_matches_partition() {
        let shows: Vec<_> = (1..=28).map(|day| show(day as i32, 1, 1, at(day, 12))).collect();
        assert_eq!(upcoming_count(&shows, now()), classify(&shows, now()).upcoming_count());
        assert_eq!(upcoming_count(&shows, now()), 13);
    }
}
