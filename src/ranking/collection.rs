//! Collection completion per rarity tier.
//!
//! Tiers are reported in the fixed order mythic, legendary, epic, rare,
//! common; any unrecognized tiers present in the catalog follow. Owned
//! cards that are no longer in the catalog are not counted.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, Rarity};
use crate::ledger::Ledger;

/// Completion of one rarity tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityProgress {
    pub rarity: Rarity,
    pub owned: usize,
    pub total: usize,
    pub percentage: f64,
}

/// A user's completion across the whole catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub display_name: String,
    pub tiers: Vec<RarityProgress>,
    pub owned_total: usize,
    pub catalog_total: usize,
    pub percentage: f64,
    pub points: u64,
}

fn percentage(owned: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        owned as f64 / total as f64 * 100.0
    }
}

/// Per-rarity completion for one user, or `None` if not registered.
#[must_use]
pub fn collection_report(
    snapshot: &Ledger,
    user_id: &str,
    catalog: &CardCatalog,
) -> Option<CollectionReport> {
    let record = snapshot.get(user_id)?;

    let extra = catalog.rarities().filter(|r| !r.is_canonical()).cloned();
    let tiers: Vec<RarityProgress> = Rarity::CANONICAL
        .into_iter()
        .chain(extra)
        .map(|rarity| {
            let total = catalog.count_of(&rarity);
            let owned = record
                .owned_cards
                .iter()
                .filter(|name| catalog.lookup(name).is_some_and(|(r, _)| *r == rarity))
                .count();
            RarityProgress {
                percentage: percentage(owned, total),
                rarity,
                owned,
                total,
            }
        })
        .collect();

    let owned_total = tiers.iter().map(|t| t.owned).sum();
    let catalog_total = catalog.total_count();
    Some(CollectionReport {
        display_name: record.display_name.clone(),
        tiers,
        owned_total,
        catalog_total,
        percentage: percentage(owned_total, catalog_total),
        points: record.points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::UserRecord;

    fn catalog() -> CardCatalog {
        CardCatalog::from_json_str(
            r#"{
                "common": {"A": {}, "B": {}, "C": {}, "D": {}},
                "legendary": {"L": {}},
                "promo": {"P": {}}
            }"#,
        )
        .unwrap()
    }

    fn ledger_with(cards: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        let mut record = UserRecord::new("ada");
        record.owned_cards = cards.iter().map(|c| c.to_string()).collect();
        ledger.insert_new("u1", record);
        ledger
    }

    #[test]
    fn test_tier_order() {
        let report = collection_report(&ledger_with(&[]), "u1", &catalog()).unwrap();
        let order: Vec<_> = report.tiers.iter().map(|t| t.rarity.to_string()).collect();
        assert_eq!(order, ["mythic", "legendary", "epic", "rare", "common", "promo"]);
    }

    #[test]
    fn test_counts_and_percentages() {
        let report = collection_report(&ledger_with(&["A", "L"]), "u1", &catalog()).unwrap();

        let common = &report.tiers[4];
        assert_eq!((common.owned, common.total), (1, 4));
        assert!((common.percentage - 25.0).abs() < 1e-9);

        let legendary = &report.tiers[1];
        assert_eq!((legendary.owned, legendary.total), (1, 1));
        assert!((legendary.percentage - 100.0).abs() < 1e-9);

        let mythic = &report.tiers[0];
        assert_eq!((mythic.owned, mythic.total), (0, 0));
        assert_eq!(mythic.percentage, 0.0);

        assert_eq!(report.owned_total, 2);
        assert_eq!(report.catalog_total, 6);
        assert!((report.percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stale_cards_ignored() {
        let report = collection_report(&ledger_with(&["A", "Retired"]), "u1", &catalog()).unwrap();
        assert_eq!(report.owned_total, 1);
    }

    #[test]
    fn test_unknown_user() {
        assert!(collection_report(&Ledger::new(), "u1", &catalog()).is_none());
    }
}
