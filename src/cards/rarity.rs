//! Rarity tiers and their point weights.
//!
//! The five canonical tiers carry fixed weights
//! (common 1, rare 2, epic 3, legendary 4, mythic 5). Catalogs may contain
//! other tier tags; those are kept verbatim and are worth 0 points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rarity tier of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Mythic,
    Legendary,
    Epic,
    Rare,
    Common,
    /// Unrecognized tier tag from the catalog source.
    Other(String),
}

impl Rarity {
    /// Canonical tiers, highest first. Reports iterate in this order.
    pub const CANONICAL: [Rarity; 5] = [
        Rarity::Mythic,
        Rarity::Legendary,
        Rarity::Epic,
        Rarity::Rare,
        Rarity::Common,
    ];

    /// Points awarded for drawing a card of this tier.
    #[must_use]
    pub fn weight(&self) -> u64 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
            Rarity::Mythic => 5,
            Rarity::Other(_) => 0,
        }
    }

    /// The tag used in the catalog source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
            Rarity::Other(tag) => tag,
        }
    }

    /// Whether this is one of the five canonical tiers.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Rarity::Other(_))
    }
}

impl FromStr for Rarity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "common" => Rarity::Common,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "mythic" => Rarity::Mythic,
            other => Rarity::Other(other.to_string()),
        })
    }
}

impl From<&str> for Rarity {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(rarity) => rarity,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Rarity::from(tag.as_str()))
    }
}
