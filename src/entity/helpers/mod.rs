//! Store operations over the entity tables.
//!
//! Every write runs in its own transaction: it either commits whole or the
//! transaction is dropped and rolled back, leaving the tables untouched.

pub mod artists;
pub mod shows;
pub mod venues;

/// Distinct ids, ascending.
fn distinct_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
