//! Recommendation error types.

use crate::catalog::{CatalogError, DatasetError, StoreError};
use crate::domain::Network;

use super::select::Recommendation;

/// Errors from a recommendation request.
///
/// Counters are only ever changed after selection succeeded, so every
/// variant except [`FeedbackNotPersisted`](Self::FeedbackNotPersisted)
/// means learning state is untouched.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// Requested network is malformed or not served
    #[error("unknown network: {0:?}")]
    UnknownNetwork(String),

    /// Session has no shared location yet
    #[error("no location shared for this session")]
    MissingLocation,

    /// Catalog had to be built and the raw dataset was unusable
    #[error("data source error: {0}")]
    DataSource(#[source] DatasetError),

    /// Fewer admissible stations than the number to recommend
    #[error("only {admissible} admissible {network} stations nearby, need {required}")]
    InsufficientOptions {
        network: Network,
        admissible: usize,
        required: usize,
    },

    /// Persisted catalog could not be read
    #[error("persistence error: {0}")]
    Persistence(#[source] StoreError),

    /// Recommendation was produced but its learning update was not saved
    #[error("recommendation made but counters not persisted: {source}")]
    FeedbackNotPersisted {
        recommendation: Box<Recommendation>,
        source: StoreError,
    },

    /// Feedback referred to stations outside the catalog
    #[error("invalid feedback: {0}")]
    Feedback(#[from] FeedbackError),
}

impl From<CatalogError> for RecommendError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::DataSource(e) => RecommendError::DataSource(e),
            CatalogError::Persistence(e) => RecommendError::Persistence(e),
        }
    }
}

/// Errors applying feedback to a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("catalog is for {catalog}, feedback is for {requested}")]
    NetworkMismatch { catalog: Network, requested: Network },

    #[error("station {0} is not in the catalog")]
    UnknownStation(usize),

    #[error("station {0} appears more than once")]
    DuplicateStation(usize),

    #[error("{picks} stations given but only {weights} rank weights")]
    TooManyPicks { picks: usize, weights: usize },
}
