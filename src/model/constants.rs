// TrueSkill environment constants
pub const MU: f64 = 25.0;
pub const SIGMA: f64 = MU / 3.0;
pub const BETA: f64 = SIGMA / 2.0;
pub const TAU: f64 = SIGMA / 100.0;
pub const DRAW_PROBABILITY: f64 = 0.10;
// Leaderboard policy defaults
pub const TOURNAMENT_LIMIT: u32 = 2;
pub const SEEDED_MULTIPLIER: u32 = 4;
pub const MIXED_MULTIPLIER: u32 = 2;
// Decay defaults (days)
pub const DAYS_INACTIVE_THRESHOLD: u32 = 365;
pub const TOTAL_DECAY_DAYS: u32 = 1461;
// Score string which marks a drawn match
pub const DRAW_SCORE: &str = "draw";
