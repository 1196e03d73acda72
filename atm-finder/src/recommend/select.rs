//! Admissibility filtering and top-N selection.
//!
//! This step is pure: it reads counters but never changes them, so asking
//! twice with no feedback in between gives identical answers.

use crate::domain::{Catalog, Coordinate, Network, Station};

use super::config::EngineConfig;
use super::error::RecommendError;
use super::rank::{RankedStation, rank};

/// A selected station, identified by its catalog position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub index: usize,
    pub distance_meters: f64,
}

/// One recommended station as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedStation {
    pub bank: String,
    pub street: String,
    pub street_number: String,
    pub terminal_count: u32,
    pub location: Coordinate,
    pub distance_meters: f64,
    /// Heuristic withdrawals left; see [`Station::remaining_estimate`].
    pub remaining_estimate: i64,
}

impl RecommendedStation {
    fn new(station: &Station, distance_meters: f64, per_terminal_capacity: i64) -> Self {
        Self {
            bank: station.bank.clone(),
            street: station.street.clone(),
            street_number: station.street_number.clone(),
            terminal_count: station.terminal_count,
            location: station.location,
            distance_meters,
            remaining_estimate: station.remaining_estimate(per_terminal_capacity),
        }
    }
}

/// The stations recommended for one request, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub network: Network,
    pub stations: Vec<RecommendedStation>,
    /// Drawn from a catalog whose scheduled rebuild failed
    pub stale: bool,
}

impl Recommendation {
    /// Describe `picks` using the counters currently in `catalog`.
    ///
    /// Picks outside the catalog are skipped.
    pub fn describe(catalog: &Catalog, picks: &[Pick], per_terminal_capacity: i64) -> Self {
        let stations = picks
            .iter()
            .filter_map(|pick| {
                catalog
                    .get(pick.index)
                    .map(|s| RecommendedStation::new(s, pick.distance_meters, per_terminal_capacity))
            })
            .collect();

        Self {
            network: catalog.network().clone(),
            stations,
            stale: false,
        }
    }
}

/// Whether a ranked station passes both hard filters.
///
/// Both bounds are strict: a station exactly at the radius, or exactly at
/// the capacity ceiling, is excluded.
pub fn is_admissible(ranked: &RankedStation<'_>, config: &EngineConfig) -> bool {
    ranked.distance_meters < config.radius_meters
        && ranked.station.counters.estimated_consumed() < config.capacity_ceiling
}

/// Take the first `top_n` admissible stations from a distance ranking.
///
/// Fails without a partial result when fewer than `top_n` are admissible.
pub fn choose(
    ranked: &[RankedStation<'_>],
    network: &Network,
    config: &EngineConfig,
) -> Result<Vec<Pick>, RecommendError> {
    let admissible: Vec<Pick> = ranked
        .iter()
        .filter(|r| is_admissible(r, config))
        .map(|r| Pick {
            index: r.index,
            distance_meters: r.distance_meters,
        })
        .collect();

    if admissible.len() < config.top_n {
        return Err(RecommendError::InsufficientOptions {
            network: network.clone(),
            admissible: admissible.len(),
            required: config.top_n,
        });
    }

    Ok(admissible.into_iter().take(config.top_n).collect())
}

/// Select the top stations of `network` in `catalog` for a user at `origin`.
pub fn select(
    catalog: &Catalog,
    network: &Network,
    origin: Coordinate,
    config: &EngineConfig,
) -> Result<Vec<Pick>, RecommendError> {
    // Another network's catalog yields no candidates
    let candidates: Vec<RankedStation<'_>> = rank(catalog.stations(), origin)
        .into_iter()
        .filter(|r| &r.station.network == network)
        .collect();

    choose(&candidates, network, config)
}

/// Select and describe, without learning from the result.
pub fn recommend(
    catalog: &Catalog,
    network: &Network,
    origin: Coordinate,
    config: &EngineConfig,
) -> Result<Recommendation, RecommendError> {
    let picks = select(catalog, network, origin, config)?;
    Ok(Recommendation::describe(
        catalog,
        &picks,
        config.per_terminal_capacity,
    ))
}
