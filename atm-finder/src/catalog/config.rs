//! Catalog configuration.

/// Default locality filter applied when building a catalog.
pub const DEFAULT_LOCALITY: &str = "CABA";

/// Default hour of day (local time) at which persisted catalogs go stale.
pub const DEFAULT_REFRESH_HOUR: u32 = 8;

/// Configuration for building and refreshing catalogs.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Only stations in this locality are kept at build time.
    pub locality: String,

    /// Daily staleness boundary, as an hour of day in `0..=23`.
    /// A catalog written before this hour is rebuilt once the clock
    /// reaches it. `0` disables refreshing.
    pub refresh_hour: u32,
}

impl CatalogConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(locality: impl Into<String>, refresh_hour: u32) -> Self {
        Self {
            locality: locality.into(),
            refresh_hour,
        }
    }

    /// Set a custom locality.
    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = locality.into();
        self
    }

    /// Set a custom refresh hour.
    pub fn with_refresh_hour(mut self, refresh_hour: u32) -> Self {
        self.refresh_hour = refresh_hour;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALITY, DEFAULT_REFRESH_HOUR)
    }
}
