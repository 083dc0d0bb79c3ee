//! User profile view.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CatalogEntry, Rarity};
use crate::ledger::UserRecord;
use crate::ranking::RankInfo;

/// One owned card resolved against the current catalog.
///
/// `rarity` and `entry` are `None` for cards since removed from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCard {
    pub name: String,
    pub rarity: Option<Rarity>,
    pub entry: Option<CatalogEntry>,
}

/// Everything a caller needs to show a user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    pub points: u64,
    /// Owned cards in the order they were granted.
    pub cards: Vec<OwnedCard>,
    pub rank: RankInfo,
}

impl Profile {
    pub(crate) fn build(
        user_id: &str,
        record: &UserRecord,
        catalog: &CardCatalog,
        rank: RankInfo,
    ) -> Self {
        let cards = record
            .owned_cards
            .iter()
            .map(|name| {
                let found = catalog.lookup(name);
                OwnedCard {
                    name: name.clone(),
                    rarity: found.map(|(r, _)| r.clone()),
                    entry: found.map(|(_, e)| e.clone()),
                }
            })
            .collect();

        Self {
            user_id: user_id.to_string(),
            display_name: record.display_name.clone(),
            points: record.points,
            cards,
            rank,
        }
    }

    /// Owned cards that are no longer in the catalog.
    pub fn stale_cards(&self) -> impl Iterator<Item = &str> {
        self.cards
            .iter()
            .filter(|c| c.rarity.is_none())
            .map(|c| c.name.as_str())
    }
}
