//! Learning from recommendations.
//!
//! Each successful recommendation bumps one rank counter on each returned
//! station (first place on the first, and so on) and recomputes the
//! consumption estimate of those stations only.

use crate::domain::{Catalog, Network};

use super::error::FeedbackError;

/// Record that the stations at `picks` (catalog indices, best first) were
/// recommended together.
///
/// All indices are validated before anything changes, so a rejected call
/// leaves the catalog untouched.
pub fn apply_feedback(
    catalog: &mut Catalog,
    network: &Network,
    picks: &[usize],
    weights: &[f64],
) -> Result<(), FeedbackError> {
    if catalog.network() != network {
        return Err(FeedbackError::NetworkMismatch {
            catalog: catalog.network().clone(),
            requested: network.clone(),
        });
    }
    if picks.len() > weights.len() {
        return Err(FeedbackError::TooManyPicks {
            picks: picks.len(),
            weights: weights.len(),
        });
    }
    for (i, &index) in picks.iter().enumerate() {
        if index >= catalog.len() {
            return Err(FeedbackError::UnknownStation(index));
        }
        if picks[..i].contains(&index) {
            return Err(FeedbackError::DuplicateStation(index));
        }
    }

    for (position, &index) in picks.iter().enumerate() {
        if let Some(counters) = catalog.counters_mut(index) {
            counters.record_rank(position);
            counters.recompute(weights);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station, UsageCounters};

    const WEIGHTS: [f64; 3] = [0.7, 0.2, 0.1];

    fn link() -> Network {
        Network::parse("LINK").unwrap()
    }

    fn catalog(n: usize) -> Catalog {
        let stations = (0..n)
            .map(|i| Station {
                bank: format!("s{}", i + 1),
                street: "Florida".to_string(),
                street_number: i.to_string(),
                location: Coordinate::new(-34.6, -58.4).unwrap(),
                terminal_count: 1,
                network: link(),
                locality: "CABA".to_string(),
                counters: UsageCounters::default(),
            })
            .collect();
        Catalog::new(link(), "CABA", stations).unwrap()
    }

    fn consumed(catalog: &Catalog, index: usize) -> f64 {
        catalog.get(index).unwrap().counters.estimated_consumed()
    }

    #[test]
    fn one_round_sets_weights() {
        let mut c = catalog(5);
        apply_feedback(&mut c, &link(), &[4, 0, 2], &WEIGHTS).unwrap();

        assert_eq!(consumed(&c, 4), 0.7);
        assert_eq!(consumed(&c, 0), 0.2);
        assert_eq!(consumed(&c, 2), 0.1);
        assert_eq!(c.get(4).unwrap().counters.rank1_count(), 1);
        assert_eq!(c.get(0).unwrap().counters.rank2_count(), 1);
        assert_eq!(c.get(2).unwrap().counters.rank3_count(), 1);
    }

    #[test]
    fn unpicked_stations_untouched() {
        let mut c = catalog(5);
        apply_feedback(&mut c, &link(), &[4, 0, 2], &WEIGHTS).unwrap();

        for i in [1, 3] {
            assert_eq!(c.get(i).unwrap().counters, UsageCounters::default());
        }
    }

    #[test]
    fn repeated_first_place_accumulates_count_not_score() {
        let mut c = catalog(4);
        for round in 1..=5u64 {
            apply_feedback(&mut c, &link(), &[0, 1, 2], &WEIGHTS).unwrap();
            let expected = 0.7 * round as f64;
            assert!((consumed(&c, 0) - expected).abs() < 1e-9);
        }
        assert_eq!(c.get(0).unwrap().counters.rank1_count(), 5);
        assert_eq!(c.get(0).unwrap().counters.rank2_count(), 0);
    }

    #[test]
    fn mixed_positions() {
        let mut c = catalog(4);
        apply_feedback(&mut c, &link(), &[0, 1, 2], &WEIGHTS).unwrap();
        apply_feedback(&mut c, &link(), &[1, 0, 3], &WEIGHTS).unwrap();

        // s1: one first, one second
        assert!((consumed(&c, 0) - 0.9).abs() < 1e-9);
        // s2: one second, one first
        assert!((consumed(&c, 1) - 0.9).abs() < 1e-9);
        assert!((consumed(&c, 2) - 0.1).abs() < 1e-9);
        assert!((consumed(&c, 3) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn rejects_duplicates_without_change() {
        let mut c = catalog(3);
        let before = c.clone();
        let err = apply_feedback(&mut c, &link(), &[0, 1, 0], &WEIGHTS).unwrap_err();
        assert_eq!(err, FeedbackError::DuplicateStation(0));
        assert_eq!(c, before);
    }

    #[test]
    fn rejects_out_of_range_without_change() {
        let mut c = catalog(3);
        let before = c.clone();
        let err = apply_feedback(&mut c, &link(), &[0, 1, 7], &WEIGHTS).unwrap_err();
        assert_eq!(err, FeedbackError::UnknownStation(7));
        assert_eq!(c, before);
    }

    #[test]
    fn rejects_wrong_network() {
        let mut c = catalog(3);
        let banelco = Network::parse("BANELCO").unwrap();
        let err = apply_feedback(&mut c, &banelco, &[0, 1, 2], &WEIGHTS).unwrap_err();
        assert!(matches!(err, FeedbackError::NetworkMismatch { .. }));
    }

    #[test]
    fn rejects_more_picks_than_weights() {
        let mut c = catalog(4);
        let err = apply_feedback(&mut c, &link(), &[0, 1, 2, 3], &WEIGHTS).unwrap_err();
        assert_eq!(
            err,
            FeedbackError::TooManyPicks {
                picks: 4,
                weights: 3
            }
        );
    }
}
