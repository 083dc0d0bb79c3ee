//! Card identity and catalog entries.
//!
//! A card is identified by its name alone; `CardKey` pairs the name with the
//! rarity it was found under so callers can award points without a second
//! lookup. `CatalogEntry` holds the static display data for one card.

use serde::{Deserialize, Deserializer, Serialize};

use super::rarity::Rarity;

/// Substituted when a catalog entry has no description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Substituted when a catalog entry has no link.
pub const NO_LINK: &str = "No link available.";

/// A card's rarity and unique name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub rarity: Rarity,
    pub name: String,
}

impl CardKey {
    /// Create a new card key.
    #[must_use]
    pub fn new(rarity: Rarity, name: impl Into<String>) -> Self {
        Self {
            rarity,
            name: name.into(),
        }
    }

    /// Points this card is worth at grant time.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.rarity.weight()
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.rarity)
    }
}

/// Static data for one card.
///
/// Either field may be absent in the source; use the `_or_placeholder`
/// accessors when displaying.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl CatalogEntry {
    /// Create an entry with a description and no link.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            link: None,
        }
    }

    /// Add a link (builder pattern).
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn description_or_placeholder(&self) -> &str {
        if self.description.trim().is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    #[must_use]
    pub fn link_or_placeholder(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.trim().is_empty() => link,
            _ => NO_LINK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_key() {
        let key = CardKey::new(Rarity::Epic, "Ember Drake");
        assert_eq!(key.points(), 3);
        assert_eq!(format!("{}", key), "Ember Drake (epic)");
    }

    #[test]
    fn test_entry_placeholders() {
        let empty = CatalogEntry::default();
        assert_eq!(empty.description_or_placeholder(), NO_DESCRIPTION);
        assert_eq!(empty.link_or_placeholder(), NO_LINK);

        let blank_link = CatalogEntry::new("A drake").with_link("  ");
        assert_eq!(blank_link.description_or_placeholder(), "A drake");
        assert_eq!(blank_link.link_or_placeholder(), NO_LINK);

        let full = CatalogEntry::new("A drake").with_link("https://cards.example/drake");
        assert_eq!(full.link_or_placeholder(), "https://cards.example/drake");
    }

    #[test]
    fn test_entry_missing_fields() {
        let entry: CatalogEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry, CatalogEntry::default());

        let entry: CatalogEntry =
            serde_json::from_str(r#"{"description": "x", "link": "https://a"}"#).unwrap();
        assert_eq!(entry.link.as_deref(), Some("https://a"));
    }
}
