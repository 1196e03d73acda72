//! Per-user query context.
//!
//! A session holds the user's most recently shared location. It is owned by
//! the caller (the transport layer keys and stores sessions however it
//! likes) and passed into each recommendation. Nothing here is persisted.

use crate::domain::Coordinate;

/// Transient state for one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    location: Option<Coordinate>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that already has a location.
    pub fn at(location: Coordinate) -> Self {
        Self {
            location: Some(location),
        }
    }

    /// Store a newly shared location, replacing any previous one.
    pub fn share_location(&mut self, location: Coordinate) {
        self.location = Some(location);
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// Forget the location.
    pub fn clear(&mut self) {
        self.location = None;
    }
}
