//! Station catalogs: raw dataset, persisted store and refresh policy.
//!
//! A catalog is built from the raw dataset the first time a network is
//! requested, and again once a day after the refresh hour. In between, the
//! persisted copy (with its usage counters) is authoritative.

mod config;
mod dataset;
mod error;
mod freshness;
mod loader;
mod store;

pub use config::{CatalogConfig, DEFAULT_LOCALITY, DEFAULT_REFRESH_HOUR};
pub use dataset::{
    CsvFileDataset, DatasetSource, RawStationRecord, build_catalog, download_dataset, parse_csv,
};
pub use error::{CatalogError, DatasetError, StoreError};
pub use freshness::RefreshPolicy;
pub use loader::{LoadedCatalog, StationCatalog};
pub use store::{CatalogStore, FileCatalogStore, MemoryCatalogStore, StoredCatalog};
