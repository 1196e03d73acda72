//! Catalog error types.

use std::path::PathBuf;

use crate::domain::{InvalidCatalog, Network};

/// Errors reading or projecting the raw station dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file could not be opened or read
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV stream is unreadable (bad header, I/O failure mid-stream)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Download of the dataset failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Locality and network filters left nothing to build a catalog from
    #[error("no {network} stations in locality {locality:?}")]
    NoStations { network: Network, locality: String },

    /// Projected rows do not form a valid catalog
    #[error("invalid catalog: {0}")]
    Invalid(#[from] InvalidCatalog),
}

/// Errors from the persisted catalog store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store file could not be read, written or renamed
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Persisted document is not a valid catalog
    #[error("corrupt catalog at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Persisted document holds another network's catalog
    #[error("catalog at {path} is for {found}, expected {expected}")]
    Mismatch {
        path: PathBuf,
        expected: Network,
        found: Network,
    },

    /// Catalog could not be serialized
    #[error("failed to serialize catalog: {0}")]
    Serialize(serde_json::Error),
}

/// Errors from loading a network catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog had to be rebuilt and the raw dataset was unusable
    #[error("data source error: {0}")]
    DataSource(#[from] DatasetError),

    /// Persisted store could not be read or written
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}
