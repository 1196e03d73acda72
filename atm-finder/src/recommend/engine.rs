//! The recommendation engine.
//!
//! One call loads the network's catalog, selects the nearest admissible
//! stations, bumps their counters and writes the catalog back. That whole
//! sequence holds the network's lock, so concurrent calls for the same
//! network cannot lose or double-count updates. Different networks never
//! wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::catalog::{CatalogStore, DatasetSource, LoadedCatalog, StationCatalog};
use crate::domain::Network;
use crate::session::Session;

use super::config::{ConfigError, EngineConfig};
use super::error::RecommendError;
use super::feedback::apply_feedback;
use super::select::{Recommendation, select};

/// One mutex per network, created on first use.
#[derive(Debug, Default)]
struct NetworkLocks {
    locks: Mutex<HashMap<Network, Arc<Mutex<()>>>>,
}

impl NetworkLocks {
    fn for_network(&self, network: &Network) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(network.clone()).or_default())
    }
}

/// Recommends stations and learns from what it recommended.
pub struct RecommendationEngine<S, D> {
    catalog: StationCatalog<S, D>,
    config: EngineConfig,
    locks: NetworkLocks,
}

impl<S: CatalogStore, D: DatasetSource> RecommendationEngine<S, D> {
    /// Create an engine, rejecting unusable configuration.
    pub fn new(catalog: StationCatalog<S, D>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            locks: NetworkLocks::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn supported_networks(&self) -> &[Network] {
        &self.config.supported_networks
    }

    /// Parse and check a caller-supplied network name.
    pub fn resolve_network(&self, name: &str) -> Result<Network, RecommendError> {
        Network::parse_normalized(name)
            .ok()
            .filter(|n| self.config.supports(n))
            .ok_or_else(|| RecommendError::UnknownNetwork(name.to_string()))
    }

    /// Recommend stations of `network` near the session's location, as of now.
    pub fn recommend(
        &self,
        network: &str,
        session: &Session,
    ) -> Result<Recommendation, RecommendError> {
        self.recommend_at(network, session, Local::now())
    }

    /// Recommend stations of `network` near the session's location.
    ///
    /// `now` drives the catalog refresh decision. On success the returned
    /// estimates already reflect this recommendation's counter update.
    pub fn recommend_at(
        &self,
        network: &str,
        session: &Session,
        now: DateTime<Local>,
    ) -> Result<Recommendation, RecommendError> {
        let network = self.resolve_network(network)?;
        let origin = session.location().ok_or(RecommendError::MissingLocation)?;

        let lock = self.locks.for_network(&network);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let LoadedCatalog { mut catalog, stale } = self.catalog.load_at(&network, now)?;
        let picks = select(&catalog, &network, origin, &self.config)?;

        let indices: Vec<usize> = picks.iter().map(|p| p.index).collect();
        apply_feedback(&mut catalog, &network, &indices, &self.config.rank_weights)?;

        let mut recommendation =
            Recommendation::describe(&catalog, &picks, self.config.per_terminal_capacity);
        recommendation.stale = stale;

        if let Err(source) = self.catalog.persist(&catalog) {
            warn!(%network, error = %source, "failed to persist counters after recommendation");
            return Err(RecommendError::FeedbackNotPersisted {
                recommendation: Box::new(recommendation),
                source,
            });
        }

        info!(
            %network,
            stations = recommendation.stations.len(),
            stale,
            nearest_m = ?picks.first().map(|p| p.distance_meters.round()),
            "recommended stations"
        );
        Ok(recommendation)
    }
}
