//! Domain types for the withdrawal-station recommender.
//!
//! This module contains the validated value types the rest of the crate
//! works with. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod catalog;
mod coordinate;
mod network;
mod station;

pub use catalog::{Catalog, InvalidCatalog};
pub use coordinate::{Coordinate, InvalidCoordinate};
pub use network::{InvalidNetwork, Network};
pub use station::{Station, UsageCounters};
