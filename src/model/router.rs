use crate::{
    config::ProcessorConfig,
    model::structures::{leaderboard_type::LeaderboardType, ruleset::Ruleset}
};

/// A single pool destination of a match and how many times its outcome is
/// applied there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub leaderboard_type: LeaderboardType,
    pub weight: u32
}

impl Route {
    pub fn new(leaderboard_type: LeaderboardType, weight: u32) -> Route {
        Route {
            leaderboard_type,
            weight
        }
    }
}

/// Decides which pools a match counts toward, based on its tournament's
/// ruleset and, for `Multiple` tournaments, the match's own ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRouter {
    seeded_multiplier: u32,
    mixed_multiplier: u32
}

impl MatchRouter {
    pub fn new(config: &ProcessorConfig) -> MatchRouter {
        MatchRouter {
            seeded_multiplier: config.seeded_multiplier,
            mixed_multiplier: config.mixed_multiplier
        }
    }

    /// Routes one match. An empty result means the match enters no pool.
    pub fn route(&self, tournament_ruleset: &Ruleset, match_ruleset: Option<&Ruleset>) -> Vec<Route> {
        match tournament_ruleset {
            // Sub-formats are resolved one level deep only.
            Ruleset::Multiple => match match_ruleset {
                Some(Ruleset::Seeded) => self.seeded_row(),
                Some(Ruleset::Multiple | Ruleset::Team) | None => Vec::new(),
                Some(_) => self.unseeded_row()
            },
            Ruleset::Seeded => self.seeded_row(),
            Ruleset::Mixed => vec![
                Route::new(LeaderboardType::Mixed, self.mixed_multiplier),
                Route::new(LeaderboardType::Unseeded, 1),
            ],
            Ruleset::Other | Ruleset::Team => Vec::new(),
            Ruleset::Unseeded | Ruleset::Diversity | Ruleset::Unrecognized(_) => self.unseeded_row()
        }
    }

    fn seeded_row(&self) -> Vec<Route> {
        vec![
            Route::new(LeaderboardType::Mixed, self.seeded_multiplier),
            Route::new(LeaderboardType::Seeded, 1),
        ]
    }

    fn unseeded_row(&self) -> Vec<Route> {
        vec![
            Route::new(LeaderboardType::Mixed, 1),
            Route::new(LeaderboardType::Unseeded, 1),
        ]
    }
}

/// Whether tournaments of this ruleset can feed the given leaderboard.
/// `Multiple` tournaments may feed every leaderboard depending on their matches.
pub fn contributes_to(ruleset: &Ruleset, leaderboard_type: LeaderboardType) -> bool {
    match ruleset {
        Ruleset::Other | Ruleset::Team => false,
        Ruleset::Multiple => true,
        Ruleset::Seeded => leaderboard_type != LeaderboardType::Unseeded,
        _ => leaderboard_type != LeaderboardType::Seeded
    }
}
