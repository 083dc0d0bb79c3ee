//! Card catalog: rarity -> card name -> entry.
//!
//! The catalog is loaded once per process and read-only afterwards.
//! Card names are unique across all rarities, so the catalog keeps a
//! name index for O(1) lookup of a card's rarity.
//!
//! ## Source format
//!
//! ```json
//! {
//!   "common": { "Pebble": { "description": "Just a rock", "link": "https://..." } },
//!   "mythic": { "Starfall": { "description": "..." } }
//! }
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use super::definition::{CardKey, CatalogEntry};
use super::rarity::Rarity;
use crate::core::error::CatalogError;

/// Immutable card catalog.
///
/// ## Example
///
/// ```
/// use card_ledger::cards::{CardCatalog, Rarity};
///
/// let catalog = CardCatalog::from_json_str(
///     r#"{"common": {"Pebble": {"description": "Just a rock"}}}"#,
/// ).unwrap();
///
/// let (rarity, entry) = catalog.lookup("Pebble").unwrap();
/// assert_eq!(*rarity, Rarity::Common);
/// assert_eq!(entry.description, "Just a rock");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    tiers: BTreeMap<Rarity, BTreeMap<String, CatalogEntry>>,
    index: FxHashMap<String, Rarity>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog from a JSON file.
    ///
    /// A missing or empty file yields an empty catalog. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "card catalog not found, no cards are grantable");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let catalog = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            cards = catalog.total_count(),
            rarities = catalog.tiers.len(),
            "loaded card catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text. Blank text is an empty catalog.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: BTreeMap<String, BTreeMap<String, CatalogEntry>> = serde_json::from_str(text)?;
        let mut catalog = Self::new();
        for (tag, cards) in raw {
            let rarity = Rarity::from(tag.as_str());
            if !rarity.is_canonical() {
                warn!(rarity = %rarity, "unrecognized rarity tier, its cards are worth 0 points");
            }
            for (name, entry) in cards {
                catalog.insert(rarity.clone(), name, entry)?;
            }
        }
        Ok(catalog)
    }

    /// Add a card.
    ///
    /// Fails if a card with the same name already exists under any rarity.
    pub fn insert(
        &mut self,
        rarity: Rarity,
        name: impl Into<String>,
        entry: CatalogEntry,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if let Some(existing) = self.index.get(&name) {
            return Err(CatalogError::DuplicateCard {
                name,
                first: existing.to_string(),
                second: rarity.to_string(),
            });
        }
        self.index.insert(name.clone(), rarity.clone());
        self.tiers.entry(rarity).or_default().insert(name, entry);
        Ok(())
    }

    /// Total number of cards across all rarities.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.index.len()
    }

    /// Check if the catalog has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check if a card name is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Find a card by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(&Rarity, &CatalogEntry)> {
        let rarity = self.index.get(name)?;
        let entry = self.tiers.get(rarity)?.get(name)?;
        Some((rarity, entry))
    }

    /// Find a card by name and return its key.
    #[must_use]
    pub fn key_of(&self, name: &str) -> Option<CardKey> {
        self.index
            .get(name)
            .map(|rarity| CardKey::new(rarity.clone(), name))
    }

    /// Number of cards in one rarity tier.
    #[must_use]
    pub fn count_of(&self, rarity: &Rarity) -> usize {
        self.tiers.get(rarity).map_or(0, BTreeMap::len)
    }

    /// Card names in one rarity tier, sorted.
    pub fn cards_of<'a>(&'a self, rarity: &Rarity) -> impl Iterator<Item = &'a str> + 'a {
        self.tiers
            .get(rarity)
            .into_iter()
            .flat_map(|cards| cards.keys().map(String::as_str))
    }

    /// Rarity tiers present in the catalog, highest first.
    pub fn rarities(&self) -> impl Iterator<Item = &Rarity> {
        self.tiers.keys()
    }

    /// Iterate over all cards: highest rarity first, then by name.
    pub fn iter(&self) -> impl Iterator<Item = (&Rarity, &str, &CatalogEntry)> {
        self.tiers.iter().flat_map(|(rarity, cards)| {
            cards
                .iter()
                .map(move |(name, entry)| (rarity, name.as_str(), entry))
        })
    }
}
