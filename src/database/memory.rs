use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    database::{
        db_structs::{LeaderboardEntry, Tournament},
        HistorySource, SnapshotStore
    },
    error::StoreError,
    model::{
        leaderboard_model::Leaderboards, rating_tracker::player_key, structures::leaderboard_type::LeaderboardType
    }
};

/// Keeps the history and the snapshots in memory. Used for dry runs, tests and
/// benchmarks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tournaments: Vec<Tournament>,
    leaderboards: Leaderboards
}

impl InMemoryStore {
    pub fn new(tournaments: Vec<Tournament>) -> InMemoryStore {
        InMemoryStore {
            tournaments,
            leaderboards: Leaderboards::default()
        }
    }

    pub fn with_leaderboards(mut self, leaderboards: Leaderboards) -> InMemoryStore {
        self.leaderboards = leaderboards;
        self
    }

    pub fn leaderboards(&self) -> &Leaderboards {
        &self.leaderboards
    }
}

impl HistorySource for InMemoryStore {
    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        Ok(self
            .tournaments
            .iter()
            .sorted_by_key(|t| (t.date, t.id))
            .map(|t| {
                let mut tournament = t.clone();
                tournament.matches.sort_by_key(|m| m.id);
                tournament
            })
            .collect())
    }

    async fn last_active_dates(&self) -> Result<HashMap<String, NaiveDate>, StoreError> {
        Ok(last_active_dates(&self.tournaments))
    }
}

impl SnapshotStore for InMemoryStore {
    async fn replace_leaderboards(&mut self, leaderboards: &Leaderboards) -> Result<(), StoreError> {
        self.leaderboards = leaderboards.clone();
        Ok(())
    }

    async fn leaderboard(&self, leaderboard_type: LeaderboardType) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.leaderboards.get(leaderboard_type).to_vec())
    }
}

/// Latest tournament date per normalized player identity, over every recorded
/// match regardless of format
pub fn last_active_dates(tournaments: &[Tournament]) -> HashMap<String, NaiveDate> {
    let mut dates: HashMap<String, NaiveDate> = HashMap::new();

    for tournament in tournaments {
        let players = tournament
            .matches
            .iter()
            .flat_map(|m| [m.winner.as_deref(), m.loser.as_deref()])
            .flatten()
            .map(player_key)
            .filter(|key| !key.is_empty());

        for key in players {
            dates
                .entry(key)
                .and_modify(|date| *date = (*date).max(tournament.date))
                .or_insert(tournament.date);
        }
    }

    dates
}
