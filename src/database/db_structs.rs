use crate::model::structures::{leaderboard_type::LeaderboardType, match_outcome::MatchOutcome, ruleset::Ruleset};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub ruleset: Ruleset,
    pub matches: Vec<Match>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i32,
    pub tournament_id: i32,
    /// `None` when the participant could not be resolved to a player
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub outcome: MatchOutcome,
    /// Only meaningful when the tournament ruleset is `Multiple`
    pub ruleset: Option<Ruleset>
}

/// One row of a persisted leaderboard snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub leaderboard_type: LeaderboardType,
    /// 1-based rank within the leaderboard
    pub placement: u32,
    pub player: String,
    pub exposure: f64,
    pub mu: f64,
    pub sigma: f64,
    pub tournaments_played: u32,
    pub matches_played: u32
}

/// A tournament listed as feeding a leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub ruleset: Ruleset
}

impl From<&Tournament> for TournamentSummary {
    fn from(t: &Tournament) -> Self {
        TournamentSummary {
            id: t.id,
            name: t.name.clone(),
            date: t.date,
            ruleset: t.ruleset.clone()
        }
    }
}
