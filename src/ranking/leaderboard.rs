//! Leaderboards and single-user rank.
//!
//! Standings sort by points, highest first. The sort is stable over the
//! snapshot's registration order, so users with equal points keep the
//! order in which they registered. `rank_of` reports the user's 1-based
//! index in that same ordering, which makes it agree with `leaderboard`
//! even when point totals tie.

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::ledger::Ledger;

/// Default number of rows for a leaderboard.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// One row of a leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub card_count: usize,
    pub points: u64,
}

/// A user's position among all registered users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInfo {
    /// 1-based position in the full standings.
    pub position: usize,
    pub total_users: usize,
    pub total_cards_available: usize,
    pub owned_count: usize,
    pub points: u64,
}

/// Every user, ordered by points descending, ties in registration order.
#[must_use]
pub fn standings(snapshot: &Ledger) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<LeaderboardEntry> = snapshot
        .iter()
        .map(|(id, record)| LeaderboardEntry {
            user_id: id.to_string(),
            display_name: record.display_name.clone(),
            card_count: record.card_count(),
            points: record.points,
        })
        .collect();
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// The first `top_n` rows of the standings.
#[must_use]
pub fn leaderboard(snapshot: &Ledger, top_n: usize) -> Vec<LeaderboardEntry> {
    let mut rows = standings(snapshot);
    rows.truncate(top_n);
    rows
}

/// Rank of one user, or `None` if not registered.
#[must_use]
pub fn rank_of(snapshot: &Ledger, catalog: &CardCatalog, user_id: &str) -> Option<RankInfo> {
    let rows = standings(snapshot);
    let index = rows.iter().position(|row| row.user_id == user_id)?;
    let row = &rows[index];
    Some(RankInfo {
        position: index + 1,
        total_users: rows.len(),
        total_cards_available: catalog.total_count(),
        owned_count: row.card_count,
        points: row.points,
    })
}
