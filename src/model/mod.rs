pub mod constants;
pub mod decay;
pub mod leaderboard_model;
pub mod rating_tracker;
pub mod router;
pub mod structures;
pub mod trueskill;
