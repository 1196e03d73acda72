//! Distance ranking of candidate stations.
//!
//! Distances are geodesic (WGS84 ellipsoid) in meters. Ordering is stable:
//! stations at equal distance keep their catalog order.

use geo::{Distance, Geodesic};

use crate::domain::{Coordinate, Station};

/// A station paired with its distance from the user.
#[derive(Debug, Clone, Copy)]
pub struct RankedStation<'a> {
    /// Position of the station in its catalog.
    pub index: usize,
    pub station: &'a Station,
    pub distance_meters: f64,
}

/// Geodesic distance between two coordinates, in meters.
pub fn geodesic_distance(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(a.to_point(), b.to_point())
}

/// Rank `stations` by geodesic distance from `origin`, nearest first.
pub fn rank(stations: &[Station], origin: Coordinate) -> Vec<RankedStation<'_>> {
    rank_by(stations, |s| geodesic_distance(origin, s.location))
}

/// Rank `stations` by an arbitrary distance function, nearest first.
///
/// The sort is stable, so ties keep input order. NaN distances sort last.
pub fn rank_by<'a>(
    stations: &'a [Station],
    distance: impl Fn(&Station) -> f64,
) -> Vec<RankedStation<'a>> {
    let mut ranked: Vec<RankedStation<'a>> = stations
        .iter()
        .enumerate()
        .map(|(index, station)| RankedStation {
            index,
            station,
            distance_meters: distance(station),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked
}
