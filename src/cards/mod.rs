//! Card catalog: rarities, card identities and the loaded catalog.
//!
//! ## Key Types
//!
//! - `Rarity`: Tier of a card, sets its point weight
//! - `CardKey`: Rarity plus unique card name
//! - `CatalogEntry`: Description and optional link
//! - `CardCatalog`: rarity -> name -> entry, read-only once loaded
//!
//! ## Unknown Tiers
//!
//! Tier tags outside the five canonical ones are accepted as
//! `Rarity::Other` and are worth 0 points.

pub mod catalog;
pub mod definition;
pub mod rarity;

pub use catalog::CardCatalog;
pub use definition::{CardKey, CatalogEntry, NO_DESCRIPTION, NO_LINK};
pub use rarity::Rarity;
