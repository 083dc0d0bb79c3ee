//! Resource faults raised by the catalog loader, the ledger store and config.
//!
//! Expected outcomes (unknown user, cooldown, exhausted catalog) are not
//! errors; they are returned as values from the draw and ranking APIs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The card catalog source exists but cannot be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file exists but could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalog is not a rarity -> name -> entry mapping.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A card name appears under more than one rarity.
    #[error("card {name:?} is listed under both {first} and {second}")]
    DuplicateCard {
        name: String,
        first: String,
        second: String,
    },
}

/// Failure of the durable ledger.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read or written.
    #[error("ledger storage unavailable at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The durable ledger exists but does not parse.
    #[error("ledger at {} is corrupted: {source}", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The ledger could not be serialized.
    #[error("failed to encode ledger: {0}")]
    Encode(#[source] serde_json::Error),

    /// No record exists for the user.
    #[error("no ledger record for user {0:?}")]
    UnknownUser(String),

    /// Injected failure from an in-memory backend.
    #[error("ledger storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for faults of the storage medium itself.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Encode(_) | Self::Unavailable(_))
    }
}

/// The service configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Any fault surfaced by `CardService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
