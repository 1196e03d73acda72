//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::recommend::{Recommendation, RecommendedStation};

/// Request to share the user's current location.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Request for a recommendation.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Network name, case-insensitive (e.g. "link")
    pub network: String,
}

/// Networks that can be queried.
#[derive(Debug, Serialize)]
pub struct NetworksResponse {
    pub networks: Vec<String>,
}

/// A recommended station.
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    /// Bank operating the station
    pub bank: String,

    pub street: String,

    pub street_number: String,

    pub terminal_count: u32,

    pub latitude: f64,

    pub longitude: f64,

    /// Distance from the user, rounded to whole meters
    pub distance_meters: u64,

    /// Heuristic count of withdrawals still available
    pub remaining_estimate: i64,
}

impl From<&RecommendedStation> for StationResult {
    fn from(s: &RecommendedStation) -> Self {
        Self {
            bank: s.bank.clone(),
            street: s.street.clone(),
            street_number: s.street_number.clone(),
            terminal_count: s.terminal_count,
            latitude: s.location.latitude(),
            longitude: s.location.longitude(),
            distance_meters: s.distance_meters.round() as u64,
            remaining_estimate: s.remaining_estimate,
        }
    }
}

/// Recommended stations, best first.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub network: String,
    pub stations: Vec<StationResult>,

    /// Counters come from an outdated catalog
    pub stale: bool,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(r: &Recommendation) -> Self {
        Self {
            network: r.network.to_string(),
            stations: r.stations.iter().map(StationResult::from).collect(),
            stale: r.stale,
        }
    }
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Present when stations were chosen but learning state was not saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationResponse>,
}
