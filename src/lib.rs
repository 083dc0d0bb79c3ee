//! # card-ledger
//!
//! Per-user ownership of a finite catalog of collectible cards, a
//! cooldown-gated random draw, and rankings over the ledger.
//!
//! ## Design Principles
//!
//! 1. **No globals**: Catalog, cooldowns and RNG are owned by a
//!    `CardService`. Tests run many isolated services in one process.
//!
//! 2. **All-or-nothing writes**: A draw adds the card and its points in one
//!    saved unit. A failed save changes nothing.
//!
//! 3. **Outcomes are values**: Cooldown, unknown user and exhausted catalog
//!    are `DrawOutcome` variants. Only storage and catalog faults are errors.
//!
//! ## Architecture
//!
//! - **Single write lock**: `LedgerStore` serializes load-mutate-save
//!   behind one mutex. Reads take an O(1) `im` snapshot.
//!
//! - **Atomic file replace**: The ledger file is written to a temporary
//!   file and renamed into place.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, error types
//! - `cards`: Rarity tiers, card keys, catalog loading
//! - `ledger`: User records, ledger snapshot, durable store
//! - `draw`: Cooldown tracker and draw engine
//! - `ranking`: Leaderboards, rank, collection reports
//! - `service`: `CardService` facade for callers

pub mod core;
pub mod cards;
pub mod ledger;
pub mod draw;
pub mod ranking;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    DrawRng,
    ServiceConfig, DEFAULT_COOLDOWN,
    CatalogError, ConfigError, ServiceError, StoreError,
};

pub use crate::cards::{CardCatalog, CardKey, CatalogEntry, Rarity};

pub use crate::ledger::{
    Ledger, LedgerBackend, LedgerStore, Registration,
    JsonFileBackend, MemoryBackend, UserRecord,
};

pub use crate::draw::{Cooldown, CooldownTracker, DrawEngine, DrawOutcome};

pub use crate::ranking::{
    CollectionReport, RarityProgress,
    LeaderboardEntry, RankInfo, DEFAULT_LEADERBOARD_SIZE,
};

pub use crate::service::{CardService, OwnedCard, Profile};
