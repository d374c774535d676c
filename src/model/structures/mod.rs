pub mod leaderboard_type;
pub mod match_outcome;
pub mod rating;
pub mod ruleset;
