//! Core types shared by every component: RNG, configuration, errors.
//!
//! Nothing here holds process-wide state; each `CardService` owns its own
//! RNG and configuration.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{ServiceConfig, DEFAULT_COOLDOWN};
pub use error::{CatalogError, ConfigError, ServiceError, StoreError};
pub use rng::DrawRng;
