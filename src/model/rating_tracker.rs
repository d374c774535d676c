use std::collections::HashSet;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    database::db_structs::LeaderboardEntry,
    error::RatingError,
    model::{
        structures::{leaderboard_type::LeaderboardType, rating::Rating},
        trueskill::RatingModel
    }
};

/// Normalized, case-insensitive player identity
pub fn player_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Everything a pool knows about one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStanding {
    /// Spelling under which the player was first seen
    pub player: String,
    pub rating: Rating,
    pub tournaments_played: u32,
    pub matches_played: u32
}

/// Rating state of a single pool.
///
/// Players are kept in first-seen order. Participation counters and ratings are
/// updated independently: a drawn match still counts as played.
pub struct RatingTracker {
    leaderboard_type: LeaderboardType,
    standings: IndexMap<String, PlayerStanding>,
    // Players already credited with the current tournament
    counted_this_tournament: HashSet<String>
}

impl RatingTracker {
    pub fn new(leaderboard_type: LeaderboardType) -> RatingTracker {
        RatingTracker {
            leaderboard_type,
            standings: IndexMap::new(),
            counted_this_tournament: HashSet::new()
        }
    }

    pub fn leaderboard_type(&self) -> LeaderboardType {
        self.leaderboard_type
    }

    /// Must be called before the first match of every tournament.
    pub fn begin_tournament(&mut self) {
        self.counted_this_tournament.clear();
    }

    /// Ensures both players exist (with `prior` when new) and credits them with
    /// one match and, once per tournament, one tournament.
    pub fn record_match(&mut self, winner: &str, loser: &str, prior: Rating) {
        for name in [winner, loser] {
            let key = player_key(name);
            let standing = self
                .standings
                .entry(key.clone())
                .or_insert_with(|| PlayerStanding {
                    player: name.trim().to_string(),
                    rating: prior,
                    tournaments_played: 0,
                    matches_played: 0
                });

            if self.counted_this_tournament.insert(key) {
                standing.tournaments_played += 1;
            }

            standing.matches_played += 1;
        }
    }

    /// Applies `winner` beating `loser` `weight` times in a row.
    ///
    /// The update is all-or-nothing: if any repetition fails, both players keep
    /// the ratings they had before this call.
    pub fn apply_result(
        &mut self,
        model: &dyn RatingModel,
        winner: &str,
        loser: &str,
        weight: u32
    ) -> Result<(), RatingError> {
        let winner_key = player_key(winner);
        let loser_key = player_key(loser);

        let mut winner_rating = self.rating_or_default(&winner_key, model);
        let mut loser_rating = self.rating_or_default(&loser_key, model);

        for _ in 0..weight {
            (winner_rating, loser_rating) = model.rate_1vs1(&winner_rating, &loser_rating)?;
        }

        if let Some(standing) = self.standings.get_mut(&winner_key) {
            standing.rating = winner_rating;
        }
        if let Some(standing) = self.standings.get_mut(&loser_key) {
            standing.rating = loser_rating;
        }

        Ok(())
    }

    fn rating_or_default(&self, key: &str, model: &dyn RatingModel) -> Rating {
        self.standings
            .get(key)
            .map(|s| s.rating)
            .unwrap_or_else(|| model.default_rating())
    }

    pub fn get(&self, name: &str) -> Option<&PlayerStanding> {
        self.standings.get(&player_key(name))
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerStanding> {
        self.standings.values()
    }

    /// Ranks every player with at least `tournament_limit` tournaments by
    /// exposure, descending. Equal exposures fall back to the normalized
    /// identity so the order never depends on insertion order.
    pub fn leaderboard(&self, model: &dyn RatingModel, tournament_limit: u32) -> Vec<LeaderboardEntry> {
        self.standings
            .iter()
            .filter(|(_, standing)| standing.tournaments_played >= tournament_limit)
            .map(|(key, standing)| (key, model.expose(&standing.rating), standing))
            .sorted_by(|(key_a, exposure_a, _), (key_b, exposure_b, _)| {
                exposure_b.total_cmp(exposure_a).then_with(|| key_a.cmp(key_b))
            })
            .enumerate()
            .map(|(i, (_, exposure, standing))| LeaderboardEntry {
                leaderboard_type: self.leaderboard_type,
                placement: i as u32 + 1,
                player: standing.player.clone(),
                exposure,
                mu: standing.rating.mu,
                sigma: standing.rating.sigma,
                tournaments_played: standing.tournaments_played,
                matches_played: standing.matches_played
            })
            .collect()
    }
}
