//! Station recommendation and learning.
//!
//! Given a user location and a network, rank that network's stations by
//! geodesic distance, drop those that are too far or estimated to be
//! exhausted, and return the nearest few. Each recommendation then feeds
//! back into the catalog's usage counters, which drive the exhaustion
//! estimate for later requests.

mod config;
mod engine;
mod error;
mod feedback;
mod rank;
mod select;

pub use config::{ConfigError, EngineConfig};
pub use engine::RecommendationEngine;
pub use error::{FeedbackError, RecommendError};
pub use feedback::apply_feedback;
pub use rank::{RankedStation, geodesic_distance, rank, rank_by};
pub use select::{
    Pick, Recommendation, RecommendedStation, choose, is_admissible, recommend, select,
};
