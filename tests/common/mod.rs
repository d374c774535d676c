use std::{
    collections::{HashMap, HashSet},
    sync::Once
};

use leaderboard_processor::{
    config::ProcessorConfig,
    database::db_structs::Tournament,
    model::{
        structures::{
            leaderboard_type::LeaderboardType::{self, Mixed, Seeded, Unseeded},
            rating::Rating
        },
        trueskill::{RatingModel, TrueSkill}
    }
};

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct OracleStanding {
    pub rating: Rating,
    pub tournaments_played: u32,
    pub matches_played: u32
}

/// Straight-line replay of a history, one branch per tournament format and
/// no shared routing code. Player keys are lowercased names.
///
/// Panics on unresolvable participants; generated histories never have them.
pub fn oracle(tournaments: &[Tournament], config: &ProcessorConfig) -> HashMap<LeaderboardType, HashMap<String, OracleStanding>> {
    let model = TrueSkill::default();
    let prior = model.default_rating();

    let mut pools: HashMap<LeaderboardType, HashMap<String, OracleStanding>> = HashMap::new();
    for leaderboard_type in [Mixed, Seeded, Unseeded] {
        pools.insert(leaderboard_type, HashMap::new());
    }

    let mut ordered = tournaments.to_vec();
    ordered.sort_by_key(|t| (t.date, t.id));

    for tournament in ordered {
        let mut counted: HashMap<LeaderboardType, HashSet<String>> = HashMap::new();

        let mut matches = tournament.matches.clone();
        matches.sort_by_key(|m| m.id);

        for m in matches {
            let sub_format = m.ruleset.as_ref().map(|r| r.as_str().to_string());
            let targets: Vec<(LeaderboardType, u32)> = match (tournament.ruleset.as_str(), sub_format.as_deref()) {
                ("other", _) | ("team", _) => vec![],
                ("seeded", _) => vec![(Mixed, config.seeded_multiplier), (Seeded, 1)],
                ("mixed", _) => vec![(Mixed, config.mixed_multiplier), (Unseeded, 1)],
                ("multiple", Some("seeded")) => vec![(Mixed, config.seeded_multiplier), (Seeded, 1)],
                ("multiple", None | Some("multiple") | Some("team")) => vec![],
                _ => vec![(Mixed, 1), (Unseeded, 1)]
            };

            let winner = m.winner.clone().unwrap().trim().to_lowercase();
            let loser = m.loser.clone().unwrap().trim().to_lowercase();

            for (leaderboard_type, weight) in targets {
                let pool = pools.get_mut(&leaderboard_type).unwrap();
                let counted = counted.entry(leaderboard_type).or_default();

                for player in [&winner, &loser] {
                    let standing = pool.entry(player.clone()).or_insert(OracleStanding {
                        rating: prior,
                        tournaments_played: 0,
                        matches_played: 0
                    });

                    if counted.insert(player.clone()) {
                        standing.tournaments_played += 1;
                    }
                    standing.matches_played += 1;
                }

                if !m.outcome.is_decisive() {
                    continue;
                }

                for _ in 0..weight {
                    let (new_winner, new_loser) = model
                        .rate_1vs1(&pool[&winner].rating, &pool[&loser].rating)
                        .unwrap();
                    pool.get_mut(&winner).unwrap().rating = new_winner;
                    pool.get_mut(&loser).unwrap().rating = new_loser;
                }
            }
        }
    }

    pools
}

/// Oracle pool ranked the way a leaderboard is: limit filter, exposure
/// descending, then key ascending
pub fn oracle_ranking(pool: &HashMap<String, OracleStanding>, tournament_limit: u32) -> Vec<(String, OracleStanding)> {
    let model = TrueSkill::default();
    let mut ranked = pool
        .iter()
        .filter(|(_, standing)| standing.tournaments_played >= tournament_limit)
        .map(|(key, standing)| (key.clone(), standing.clone()))
        .collect::<Vec<_>>();

    ranked.sort_by(|(key_a, a), (key_b, b)| {
        model
            .expose(&b.rating)
            .total_cmp(&model.expose(&a.rating))
            .then_with(|| key_a.cmp(key_b))
    });

    ranked
}
