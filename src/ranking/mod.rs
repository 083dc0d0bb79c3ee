//! Ranking: pure functions over a ledger snapshot and the catalog.
//!
//! Nothing here mutates state or uses randomness; the same snapshot
//! always yields the same leaderboard, rank and report.

pub mod collection;
pub mod leaderboard;

pub use collection::{collection_report, CollectionReport, RarityProgress};
pub use leaderboard::{
    leaderboard, rank_of, standings, LeaderboardEntry, RankInfo, DEFAULT_LEADERBOARD_SIZE,
};
