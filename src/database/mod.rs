use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    database::db_structs::{LeaderboardEntry, Tournament},
    error::StoreError,
    model::{leaderboard_model::Leaderboards, structures::leaderboard_type::LeaderboardType}
};

pub mod db;
pub mod db_structs;
pub mod memory;

/// Read side of the match history.
///
/// Both reads must describe the same consistent history for the duration of a
/// recompute.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    /// Every tournament with its matches, ordered by `(date, id)` and match `id`
    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError>;

    /// Latest tournament date in which each player has a recorded match, keyed
    /// by normalized player identity
    async fn last_active_dates(&self) -> Result<HashMap<String, NaiveDate>, StoreError>;
}

/// Persisted leaderboard snapshots
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// Replaces every pool's snapshot. Either all pools are written or none is.
    async fn replace_leaderboards(&mut self, leaderboards: &Leaderboards) -> Result<(), StoreError>;

    /// Stored snapshot of one pool, ordered by placement
    async fn leaderboard(&self, leaderboard_type: LeaderboardType) -> Result<Vec<LeaderboardEntry>, StoreError>;
}
