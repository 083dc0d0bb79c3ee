//! Concurrency-safe ledger store.
//!
//! `LedgerStore` keeps the durable ledger cached behind a single mutex.
//! Every write runs "copy record, apply change, save whole ledger, commit
//! cache" while holding that mutex, so writes serialize and a failed save
//! leaves both the durable file and the cache as they were.
//!
//! Readers take an O(1) `snapshot()` and never observe a half-applied write.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::backend::{JsonFileBackend, LedgerBackend};
use super::record::UserRecord;
use super::snapshot::Ledger;
use crate::core::error::StoreError;

/// Outcome of `register`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Created,
    AlreadyExists,
}

/// Durable, serialized access to the ledger.
pub struct LedgerStore {
    backend: Arc<dyn LedgerBackend>,
    ledger: Mutex<Ledger>,
}

impl LedgerStore {
    /// Open a store over a backend, loading the current durable ledger.
    pub fn open(backend: Arc<dyn LedgerBackend>) -> Result<Self, StoreError> {
        let ledger = backend.load()?;
        debug!(users = ledger.len(), "ledger opened");
        Ok(Self {
            backend,
            ledger: Mutex::new(ledger),
        })
    }

    /// Open a store over a JSON file.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(Arc::new(JsonFileBackend::new(path.as_ref())))
    }

    // The cached ledger is only replaced after a successful save, so it is
    // consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a record for a new user.
    ///
    /// Concurrent calls for the same unseen user: exactly one observes
    /// `Created`, the rest `AlreadyExists`.
    pub fn register(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<Registration, StoreError> {
        let mut guard = self.lock();
        if guard.contains(user_id) {
            return Ok(Registration::AlreadyExists);
        }

        let mut next = guard.clone();
        next.insert_new(user_id, UserRecord::new(display_name));
        self.backend.save(&next)?;
        *guard = next;

        info!(user_id, display_name, "user registered");
        Ok(Registration::Created)
    }

    /// Point-in-time copy of the whole ledger.
    #[must_use]
    pub fn snapshot(&self) -> Ledger {
        self.lock().clone()
    }

    /// Copy of one user's record.
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.lock().get(user_id).cloned()
    }

    /// Apply `f` to one user's record and persist it as a single unit.
    ///
    /// `f` works on a copy. If it returns `None` nothing is written and
    /// `Ok(None)` is returned. If it returns `Some`, the changed record is
    /// saved; only after the save succeeds does the change become visible.
    ///
    /// Fails with `StoreError::UnknownUser` if the user is not registered.
    pub fn mutate<T, F>(&self, user_id: &str, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut UserRecord) -> Option<T>,
    {
        let mut guard = self.lock();
        let mut record = guard
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;

        let Some(value) = f(&mut record) else {
            return Ok(None);
        };

        let mut next = guard.clone();
        next.replace(user_id, record);
        self.backend.save(&next)?;
        *guard = next;
        Ok(Some(value))
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("users", &self.lock().len())
            .finish_non_exhaustive()
    }
}
