//! Cash-withdrawal stations and their usage counters.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Network};

/// How often a station has been recommended, and the score derived from it.
///
/// `rank_counts[i]` is the number of times the station was returned as the
/// `(i + 1)`-th recommendation. Counts only ever grow. `estimated_consumed`
/// is derived from the counts and is recomputed, never accumulated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageCounters {
    rank_counts: Vec<u64>,
    estimated_consumed: f64,
}

impl UsageCounters {
    /// Build counters from raw per-rank counts and derive the score.
    pub fn from_counts(rank_counts: Vec<u64>, weights: &[f64]) -> Self {
        let mut counters = Self {
            rank_counts,
            estimated_consumed: 0.0,
        };
        counters.recompute(weights);
        counters
    }

    /// Times returned at zero-based `position` in a recommendation.
    pub fn rank_count(&self, position: usize) -> u64 {
        self.rank_counts.get(position).copied().unwrap_or(0)
    }

    pub fn rank1_count(&self) -> u64 {
        self.rank_count(0)
    }

    pub fn rank2_count(&self) -> u64 {
        self.rank_count(1)
    }

    pub fn rank3_count(&self) -> u64 {
        self.rank_count(2)
    }

    pub fn estimated_consumed(&self) -> f64 {
        self.estimated_consumed
    }

    /// Record one appearance at zero-based `position`.
    ///
    /// Does not touch `estimated_consumed`; call [`recompute`](Self::recompute).
    pub fn record_rank(&mut self, position: usize) {
        if self.rank_counts.len() <= position {
            self.rank_counts.resize(position + 1, 0);
        }
        self.rank_counts[position] += 1;
    }

    /// Recompute the score as the weighted sum of the rank counts.
    ///
    /// Counts at positions without a weight contribute nothing.
    pub fn recompute(&mut self, weights: &[f64]) {
        self.estimated_consumed = self
            .rank_counts
            .iter()
            .zip(weights)
            .map(|(&count, &weight)| weight * count as f64)
            .sum();
    }
}

/// A single automated cash-withdrawal station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub bank: String,
    pub street: String,
    pub street_number: String,
    pub location: Coordinate,
    /// Number of terminals at the site (always positive).
    pub terminal_count: u32,
    pub network: Network,
    pub locality: String,
    #[serde(default)]
    pub counters: UsageCounters,
}

impl Station {
    /// Heuristic count of withdrawals still available today.
    ///
    /// `terminal_count * per_terminal_capacity` minus the rounded score.
    /// Rounding is half-to-even. May go negative for heavily used stations.
    pub fn remaining_estimate(&self, per_terminal_capacity: i64) -> i64 {
        let capacity = i64::from(self.terminal_count) * per_terminal_capacity;
        capacity - self.counters.estimated_consumed().round_ties_even() as i64
    }
}
