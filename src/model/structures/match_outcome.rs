use crate::model::constants::DRAW_SCORE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Decisive,
    /// Never applied to ratings. Usually a data-entry mistake.
    Draw
}

impl MatchOutcome {
    /// Derives the outcome from a recorded score such as `"2-1"` or `"draw"`.
    pub fn from_score(score: &str) -> MatchOutcome {
        if score.trim().eq_ignore_ascii_case(DRAW_SCORE) {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Decisive
        }
    }

    pub fn is_decisive(&self) -> bool {
        *self == MatchOutcome::Decisive
    }
}
