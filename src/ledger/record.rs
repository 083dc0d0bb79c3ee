//! Per-user ledger record.

use serde::{Deserialize, Serialize};

use crate::cards::CardKey;

/// One user's owned cards and points.
///
/// `points` is the sum of the rarity weights of every card at the moment it
/// was granted. Weights are never recomputed, so later catalog changes do
/// not alter past points.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name supplied at registration.
    #[serde(rename = "username")]
    pub display_name: String,

    /// Owned card names. Never contains duplicates.
    #[serde(rename = "cards", default)]
    pub owned_cards: Vec<String>,

    #[serde(default)]
    pub points: u64,
}

impl UserRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            owned_cards: Vec::new(),
            points: 0,
        }
    }

    /// Check if the user owns a card.
    #[must_use]
    pub fn owns(&self, name: &str) -> bool {
        self.owned_cards.iter().any(|c| c == name)
    }

    /// Number of cards owned.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.owned_cards.len()
    }

    /// Add a card and its points in one step.
    ///
    /// Returns `false` and leaves the record untouched if the card is
    /// already owned.
    pub fn grant(&mut self, card: &CardKey) -> bool {
        if self.owns(&card.name) {
            return false;
        }
        self.owned_cards.push(card.name.clone());
        self.points += card.points();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;

    #[test]
    fn test_grant() {
        let mut record = UserRecord::new("ada");

        assert!(record.grant(&CardKey::new(Rarity::Legendary, "Crown")));
        assert!(record.grant(&CardKey::new(Rarity::Common, "Pebble")));

        assert_eq!(record.points, 5);
        assert_eq!(record.card_count(), 2);
        assert!(record.owns("Crown"));
        assert!(!record.owns("Starfall"));
    }

    #[test]
    fn test_grant_duplicate_is_noop() {
        let mut record = UserRecord::new("ada");
        let card = CardKey::new(Rarity::Rare, "Comet");

        assert!(record.grant(&card));
        assert!(!record.grant(&card));

        assert_eq!(record.owned_cards, vec!["Comet".to_string()]);
        assert_eq!(record.points, 2);
    }

    #[test]
    fn test_wire_format() {
        let mut record = UserRecord::new("ada");
        record.grant(&CardKey::new(Rarity::Epic, "Drake"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "ada", "cards": ["Drake"], "points": 3})
        );

        let parsed: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_missing_fields_default() {
        let parsed: UserRecord = serde_json::from_str(r#"{"username": "bo"}"#).unwrap();
        assert_eq!(parsed, UserRecord::new("bo"));
    }
}
