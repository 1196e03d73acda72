//! Web layer for the station recommender.
//!
//! A thin HTTP shell: sessions hold the user's shared location and every
//! decision is delegated to the recommendation engine.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Engine, Sessions};
