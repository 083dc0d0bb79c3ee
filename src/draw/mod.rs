//! Draw system: cooldown gating and random card grants.

pub mod cooldown;
pub mod engine;

pub use cooldown::{Cooldown, CooldownTracker};
pub use engine::{undrawn_cards, DrawEngine, DrawOutcome};
