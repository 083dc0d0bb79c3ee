//! The ledger: user identifier -> `UserRecord`.
//!
//! Backed by `im` persistent collections, so cloning a `Ledger` is O(1) and a
//! clone is an independent point-in-time snapshot. Registration order is
//! kept alongside the map; it is the iteration order and therefore the
//! leaderboard tie-break order.

use std::fmt;

use im::{HashMap, Vector};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::record::UserRecord;

/// Mapping of user identifier to record, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    records: HashMap<String, UserRecord>,
    order: Vector<String>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.records.contains_key(user_id)
    }

    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&UserRecord> {
        self.records.get(user_id)
    }

    /// Add a record for a new user.
    ///
    /// Returns `false` and changes nothing if the user already exists.
    pub fn insert_new(&mut self, user_id: impl Into<String>, record: UserRecord) -> bool {
        let user_id = user_id.into();
        if self.records.contains_key(&user_id) {
            return false;
        }
        self.order.push_back(user_id.clone());
        self.records.insert(user_id, record);
        true
    }

    /// Replace an existing user's record.
    ///
    /// Returns `false` if the user is not registered.
    pub fn replace(&mut self, user_id: &str, record: UserRecord) -> bool {
        match self.records.get_mut(user_id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(user_id, record)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserRecord)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| (id.as_str(), r)))
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, record) in self.iter() {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of user id to user record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Ledger, A::Error> {
        let mut ledger = Ledger::new();
        while let Some((id, record)) = access.next_entry::<String, UserRecord>()? {
            // Duplicate keys: last value wins, first position is kept.
            if !ledger.replace(&id, record.clone()) {
                ledger.insert_new(id, record);
            }
        }
        Ok(ledger)
    }
}
