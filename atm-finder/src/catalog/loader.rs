//! Catalog loading with daily rebuild.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::domain::{Catalog, Network};

use super::config::CatalogConfig;
use super::dataset::{DatasetSource, build_catalog};
use super::error::{CatalogError, StoreError};
use super::freshness::RefreshPolicy;
use super::store::CatalogStore;

/// A catalog as handed out by [`StationCatalog::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// The catalog was due for a rebuild that failed, so it predates the
    /// latest refresh.
    pub stale: bool,
}

/// Loads per-network catalogs, rebuilding them from the raw dataset when
/// missing or stale.
///
/// Owns the store: all reads and writes of persisted catalogs go through
/// here. Callers that read, modify and write back a catalog must serialize
/// those steps per network themselves.
pub struct StationCatalog<S, D> {
    store: S,
    source: D,
    config: CatalogConfig,
    policy: RefreshPolicy,
}

impl<S: CatalogStore, D: DatasetSource> StationCatalog<S, D> {
    pub fn new(store: S, source: D, config: CatalogConfig) -> Self {
        let policy = RefreshPolicy::new(config.refresh_hour);
        Self {
            store,
            source,
            config,
            policy,
        }
    }

    /// Load the catalog for `network` as of now.
    pub fn load(&self, network: &Network) -> Result<LoadedCatalog, CatalogError> {
        self.load_at(network, Local::now())
    }

    /// Load the catalog for `network` as of `now`.
    ///
    /// A missing catalog is built and persisted; a failure to build it is
    /// returned. A stale catalog is rebuilt, but if the dataset is unusable
    /// the stale copy is returned unchanged, flagged as stale, and nothing
    /// is written.
    pub fn load_at(
        &self,
        network: &Network,
        now: DateTime<Local>,
    ) -> Result<LoadedCatalog, CatalogError> {
        let fresh = |catalog| LoadedCatalog {
            catalog,
            stale: false,
        };

        let Some(stored) = self.store.read(network)? else {
            info!(%network, "no persisted catalog, building from dataset");
            return self.rebuild(network).map(fresh);
        };

        if !self.policy.is_stale(&stored.modified_at, &now) {
            debug!(%network, modified_at = %stored.modified_at, "using persisted catalog");
            return Ok(fresh(stored.catalog));
        }

        info!(
            %network,
            modified_at = %stored.modified_at,
            refresh_hour = self.policy.refresh_hour(),
            "persisted catalog is stale, rebuilding"
        );
        match self.rebuild(network) {
            Ok(catalog) => Ok(fresh(catalog)),
            Err(CatalogError::DataSource(e)) => {
                warn!(%network, error = %e, "rebuild failed, keeping stale catalog");
                Ok(LoadedCatalog {
                    catalog: stored.catalog,
                    stale: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Build a fresh catalog from the dataset and persist it.
    ///
    /// Nothing is written unless the build succeeds.
    pub fn rebuild(&self, network: &Network) -> Result<Catalog, CatalogError> {
        let records = self.source.read()?;
        let catalog = build_catalog(records, network, &self.config.locality)?;
        self.store.write(&catalog)?;

        info!(%network, stations = catalog.len(), locality = %catalog.locality(), "built catalog");
        Ok(catalog)
    }

    /// Write back a catalog in full.
    pub fn persist(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.store.write(catalog)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
