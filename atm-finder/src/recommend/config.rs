//! Recommendation configuration.

use crate::domain::Network;

/// Error returned when an [`EngineConfig`] is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("top_n must be at least 1")]
    ZeroTopN,

    #[error("top_n is {top_n} but only {weights} rank weights are configured")]
    MissingWeights { top_n: usize, weights: usize },

    #[error("rank weight {index} is {value}, must be finite and non-negative")]
    BadWeight { index: usize, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("no supported networks configured")]
    NoNetworks,
}

/// Configuration parameters for recommendations and learning.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Stations at or beyond this distance are not admissible (meters).
    pub radius_meters: f64,

    /// Stations whose estimated consumption reaches this are not admissible.
    pub capacity_ceiling: f64,

    /// Number of stations returned per recommendation.
    pub top_n: usize,

    /// Weight of each recommendation position in the consumption estimate.
    /// `rank_weights[0]` applies to first-place counts.
    pub rank_weights: Vec<f64>,

    /// Assumed daily withdrawals per terminal.
    pub per_terminal_capacity: i64,

    /// Networks that may be queried.
    pub supported_networks: Vec<Network>,
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.rank_weights.len() < self.top_n {
            return Err(ConfigError::MissingWeights {
                top_n: self.top_n,
                weights: self.rank_weights.len(),
            });
        }
        if let Some((index, &value)) = self
            .rank_weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ConfigError::BadWeight { index, value });
        }
        if !(self.radius_meters > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "radius_meters",
                value: self.radius_meters,
            });
        }
        if !(self.capacity_ceiling > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "capacity_ceiling",
                value: self.capacity_ceiling,
            });
        }
        if self.per_terminal_capacity <= 0 {
            return Err(ConfigError::NonPositive {
                name: "per_terminal_capacity",
                value: self.per_terminal_capacity as f64,
            });
        }
        if self.supported_networks.is_empty() {
            return Err(ConfigError::NoNetworks);
        }
        Ok(())
    }

    /// Whether `network` may be queried.
    pub fn supports(&self, network: &Network) -> bool {
        self.supported_networks.contains(network)
    }

    /// Set the networks that may be queried.
    pub fn with_networks(mut self, networks: Vec<Network>) -> Self {
        self.supported_networks = networks;
        self
    }

    /// Set the number of stations per recommendation.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the per-position rank weights.
    pub fn with_rank_weights(mut self, weights: Vec<f64>) -> Self {
        self.rank_weights = weights;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let networks = ["BANELCO", "LINK"]
            .iter()
            .filter_map(|n| Network::parse(n).ok())
            .collect();

        Self {
            radius_meters: 500.0,
            capacity_ceiling: 1000.0,
            top_n: 3,
            rank_weights: vec![0.7, 0.2, 0.1],
            per_terminal_capacity: 1000,
            supported_networks: networks,
        }
    }
}
