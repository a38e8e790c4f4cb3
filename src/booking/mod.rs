//! Show-time classification and the read models built on top of it.
//!
//! Everything in here is a pure function over rows that were already
//! fetched from the store, with "now" passed in by the caller.

pub mod classify;
pub mod clock;
pub mod detail;
pub mod genres;
pub mod locality;
pub mod projection;
pub mod search;

use crate::entity::{artists, venues};

/// An entity that can be listed by id and name.
pub trait Named {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
}

impl Named for venues::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for artists::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
