//! `CardService`: the API consumed by the transport layer.
//!
//! Owns the catalog, the ledger store and the draw engine; nothing is
//! global, so several independent services can live in one process.
//! Every call is synchronous and returns expected conditions (unknown
//! user, cooldown, exhausted catalog) as values.

pub mod profile;

pub use profile::{OwnedCard, Profile};

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use tracing::info;

use crate::cards::CardCatalog;
use crate::core::config::ServiceConfig;
use crate::core::error::{CatalogError, ServiceError, StoreError};
use crate::core::rng::DrawRng;
use crate::draw::{DrawEngine, DrawOutcome};
use crate::ledger::{Ledger, LedgerStore, Registration};
use crate::ranking::{self, CollectionReport, LeaderboardEntry, RankInfo};

/// Card ledger service.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use card_ledger::{CardCatalog, CardService, DrawOutcome, LedgerStore, MemoryBackend, ServiceConfig};
///
/// let catalog = CardCatalog::from_json_str(r#"{"rare": {"Comet": {}}}"#).unwrap();
/// let store = LedgerStore::open(Arc::new(MemoryBackend::new())).unwrap();
/// let service = CardService::new(ServiceConfig::default().with_seed(1), catalog, store);
///
/// service.register("u1", "ada").unwrap();
/// let outcome = service.draw("u1").unwrap();
/// assert!(matches!(outcome, DrawOutcome::Granted { points: 2, .. }));
/// ```
#[derive(Debug)]
pub struct CardService {
    config: ServiceConfig,
    catalog: RwLock<Arc<CardCatalog>>,
    store: LedgerStore,
    engine: DrawEngine,
}

impl CardService {
    /// Build a service from already-loaded parts.
    #[must_use]
    pub fn new(config: ServiceConfig, catalog: CardCatalog, store: LedgerStore) -> Self {
        let rng = config.seed.map_or_else(DrawRng::from_entropy, DrawRng::new);
        let engine = DrawEngine::new(config.cooldown, rng);
        Self {
            config,
            catalog: RwLock::new(Arc::new(catalog)),
            store,
            engine,
        }
    }

    /// Load the catalog and ledger files named by `config`.
    pub fn open(config: ServiceConfig) -> Result<Self, ServiceError> {
        let catalog = CardCatalog::load(&config.catalog_path)?;
        let store = LedgerStore::open_file(&config.ledger_path)?;
        info!(
            cards = catalog.total_count(),
            users = store.snapshot().len(),
            cooldown_secs = config.cooldown.as_secs(),
            "card service ready"
        );
        Ok(Self::new(config, catalog, store))
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The catalog currently in effect.
    #[must_use]
    pub fn catalog(&self) -> Arc<CardCatalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-read the catalog file and swap it in. Returns the new card count.
    ///
    /// On error the previous catalog stays in effect.
    pub fn reload_catalog(&self) -> Result<usize, CatalogError> {
        let catalog = CardCatalog::load(&self.config.catalog_path)?;
        let count = catalog.total_count();
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
        info!(cards = count, "card catalog reloaded");
        Ok(count)
    }

    /// Point-in-time copy of the ledger.
    #[must_use]
    pub fn snapshot(&self) -> Ledger {
        self.store.snapshot()
    }

    /// Create an account. Idempotent.
    pub fn register(&self, user_id: &str, display_name: &str) -> Result<Registration, StoreError> {
        self.store.register(user_id, display_name)
    }

    /// Draw a card now.
    pub fn draw(&self, user_id: &str) -> Result<DrawOutcome, StoreError> {
        self.draw_at(user_id, Instant::now())
    }

    /// Draw a card at an explicit time.
    pub fn draw_at(&self, user_id: &str, now: Instant) -> Result<DrawOutcome, StoreError> {
        let catalog = self.catalog();
        self.engine.draw(&self.store, &catalog, user_id, now)
    }

    #[must_use]
    pub fn get_collection_report(&self, user_id: &str) -> Option<CollectionReport> {
        ranking::collection_report(&self.store.snapshot(), user_id, &self.catalog())
    }

    #[must_use]
    pub fn get_leaderboard(&self, top_n: usize) -> Vec<LeaderboardEntry> {
        ranking::leaderboard(&self.store.snapshot(), top_n)
    }

    #[must_use]
    pub fn get_rank(&self, user_id: &str) -> Option<RankInfo> {
        ranking::rank_of(&self.store.snapshot(), &self.catalog(), user_id)
    }

    #[must_use]
    pub fn get_profile(&self, user_id: &str) -> Option<Profile> {
        let snapshot = self.store.snapshot();
        let catalog = self.catalog();
        let record = snapshot.get(user_id)?;
        let rank = ranking::rank_of(&snapshot, &catalog, user_id)?;
        Some(Profile::build(user_id, record, &catalog, rank))
    }
}
