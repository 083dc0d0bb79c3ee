//! The draw operation: grant one unowned card to an eligible user.
//!
//! ## Order of checks
//!
//! 1. `NotRegistered` if the ledger has no record for the user.
//! 2. `CatalogEmpty` if the catalog has no cards.
//! 3. `Exhausted` if the user already owns every card.
//! 4. Cooldown: consumed atomically only now, once a grant is known to be
//!    possible, so a refused draw never costs the user their window.
//! 5. Pick uniformly among unowned cards and grant it through
//!    `LedgerStore::mutate`. If that fails, the cooldown is released.
//!
//! Every card has equal draw probability; rarity only sets the points.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::cooldown::{Cooldown, CooldownTracker};
use crate::cards::{CardCatalog, CardKey};
use crate::core::error::StoreError;
use crate::core::rng::DrawRng;
use crate::ledger::{LedgerStore, UserRecord};

/// Result of a draw attempt. Only resource faults are errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A card was granted; `points` is the user's new total.
    Granted { card: CardKey, points: u64 },
    /// The user drew too recently.
    Blocked(Duration),
    NotRegistered,
    /// The user owns every card in the catalog.
    Exhausted,
    CatalogEmpty,
}

impl DrawOutcome {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, DrawOutcome::Granted { .. })
    }
}

/// Cards in the catalog the user does not own yet, in catalog order.
#[must_use]
pub fn undrawn_cards(catalog: &CardCatalog, record: &UserRecord) -> Vec<CardKey> {
    let owned: FxHashSet<&str> = record.owned_cards.iter().map(String::as_str).collect();
    catalog
        .iter()
        .filter(|(_, name, _)| !owned.contains(name))
        .map(|(rarity, name, _)| CardKey::new(rarity.clone(), name))
        .collect()
}

/// Cooldown-gated random card grants.
#[derive(Debug)]
pub struct DrawEngine {
    cooldown: CooldownTracker,
    window: Duration,
    rng: Mutex<DrawRng>,
}

impl DrawEngine {
    /// Create an engine with the given cooldown window and random source.
    #[must_use]
    pub fn new(window: Duration, rng: DrawRng) -> Self {
        Self {
            cooldown: CooldownTracker::new(),
            window,
            rng: Mutex::new(rng),
        }
    }

    /// The cooldown window between successful draws.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time left before the user may draw, without consuming anything.
    #[must_use]
    pub fn cooldown_remaining(&self, user_id: &str, now: Instant) -> Option<Duration> {
        match self.cooldown.peek(user_id, now, self.window) {
            Cooldown::Ready => None,
            Cooldown::Blocked(remaining) => Some(remaining),
        }
    }

    /// Forget all cooldowns, as a process restart would.
    pub fn reset_cooldowns(&self) {
        self.cooldown.clear();
    }

    fn pick(&self, candidates: &[CardKey]) -> Option<CardKey> {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .choose(candidates)
            .cloned()
    }

    /// Attempt to grant one unowned card to `user_id` at time `now`.
    pub fn draw(
        &self,
        store: &LedgerStore,
        catalog: &CardCatalog,
        user_id: &str,
        now: Instant,
    ) -> Result<DrawOutcome, StoreError> {
        let Some(record) = store.get(user_id) else {
            return Ok(DrawOutcome::NotRegistered);
        };
        if catalog.is_empty() {
            return Ok(DrawOutcome::CatalogEmpty);
        }
        if undrawn_cards(catalog, &record).is_empty() {
            debug!(user_id, "draw refused, collection complete");
            return Ok(DrawOutcome::Exhausted);
        }

        if let Cooldown::Blocked(remaining) = self.cooldown.try_consume(user_id, now, self.window)
        {
            debug!(user_id, remaining_secs = remaining.as_secs(), "draw refused, on cooldown");
            return Ok(DrawOutcome::Blocked(remaining));
        }

        // Candidates are recomputed from the live record under the store lock.
        let granted = store.mutate(user_id, |record| {
            let card = self.pick(&undrawn_cards(catalog, record))?;
            record.grant(&card);
            Some((card, record.points))
        });

        match granted {
            Ok(Some((card, points))) => {
                info!(user_id, card = %card.name, rarity = %card.rarity, points, "card granted");
                Ok(DrawOutcome::Granted { card, points })
            }
            Ok(None) => {
                self.cooldown.release(user_id, now);
                Ok(DrawOutcome::Exhausted)
            }
            Err(StoreError::UnknownUser(_)) => {
                self.cooldown.release(user_id, now);
                Ok(DrawOutcome::NotRegistered)
            }
            Err(e) => {
                self.cooldown.release(user_id, now);
                Err(e)
            }
        }
    }
}
