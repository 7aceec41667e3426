// Library exports for the fitness platform admin client
// The CLI crate and the integration tests both build on these modules

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;

pub use error::{ErrorKind, StoreError};
