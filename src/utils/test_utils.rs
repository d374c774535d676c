use chrono::{Days, NaiveDate};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    database::db_structs::{LeaderboardEntry, Match, Tournament},
    model::structures::{leaderboard_type::LeaderboardType, match_outcome::MatchOutcome, ruleset::Ruleset}
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| panic!("Invalid date {}-{}-{}", year, month, day))
}

/// Builds a tournament, pointing every match at it
pub fn generate_tournament(id: i32, date: NaiveDate, ruleset: Ruleset, matches: Vec<Match>) -> Tournament {
    Tournament {
        id,
        name: format!("Tournament {}", id),
        date,
        ruleset,
        matches: matches
            .into_iter()
            .map(|mut m| {
                m.tournament_id = id;
                m
            })
            .collect()
    }
}

pub fn generate_match(id: i32, winner: &str, loser: &str) -> Match {
    Match {
        id,
        tournament_id: 0,
        winner: Some(winner.to_string()),
        loser: Some(loser.to_string()),
        outcome: MatchOutcome::Decisive,
        ruleset: None
    }
}

pub fn generate_draw(id: i32, player_a: &str, player_b: &str) -> Match {
    Match {
        outcome: MatchOutcome::Draw,
        ..generate_match(id, player_a, player_b)
    }
}

/// A match carrying its own ruleset, as found in `Multiple` tournaments
pub fn generate_sub_format_match(id: i32, winner: &str, loser: &str, ruleset: Option<Ruleset>) -> Match {
    Match {
        ruleset,
        ..generate_match(id, winner, loser)
    }
}

/// A stored leaderboard row with placeholder rating details
pub fn generate_leaderboard_entry(
    leaderboard_type: LeaderboardType,
    placement: u32,
    player: &str,
    exposure: f64
) -> LeaderboardEntry {
    LeaderboardEntry {
        leaderboard_type,
        placement,
        player: player.to_string(),
        exposure,
        mu: exposure + 15.0,
        sigma: 5.0,
        tournaments_played: 2,
        matches_played: 4
    }
}

const RULESETS: [&str; 9] = [
    "seeded",
    "mixed",
    "unseeded",
    "diversity",
    "multiple",
    "other",
    "team",
    "ironman",
    "multiple"
];

const SUB_FORMATS: [Option<&str>; 7] = [
    Some("seeded"),
    Some("mixed"),
    Some("unseeded"),
    Some("diversity"),
    Some("team"),
    Some("multiple"),
    None
];

/// Generates a reproducible, shuffled history covering every ruleset, sub-format,
/// draws, same-day tournaments and case variations of player names.
pub fn generate_history(
    seed: u64,
    n_tournaments: usize,
    n_players: usize,
    matches_per_tournament: usize
) -> Vec<Tournament> {
    if n_players < 2 {
        panic!("A history needs at least 2 players");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let players = (0..n_players).map(|i| format!("Player{}", i)).collect::<Vec<_>>();
    let start = date(2018, 1, 1);

    let mut match_id = 1;
    let mut tournaments = Vec::with_capacity(n_tournaments);

    for i in 0..n_tournaments {
        // Narrow date range so that several tournaments share a day
        let tournament_date = start + Days::new(rng.random_range(0..(n_tournaments as u64 * 3).max(1)));
        let ruleset = Ruleset::from(RULESETS[rng.random_range(0..RULESETS.len())]);

        let mut matches = Vec::with_capacity(matches_per_tournament);
        for _ in 0..matches_per_tournament {
            let winner = rng.random_range(0..n_players);
            let mut loser = rng.random_range(0..n_players - 1);
            if loser >= winner {
                loser += 1;
            }

            let mut winner = players[winner].clone();
            if rng.random_bool(0.05) {
                winner = winner.to_uppercase();
            }

            let mut generated = if rng.random_bool(0.05) {
                generate_draw(match_id, &winner, &players[loser])
            } else {
                generate_match(match_id, &winner, &players[loser])
            };

            if ruleset == Ruleset::Multiple {
                generated.ruleset = SUB_FORMATS[rng.random_range(0..SUB_FORMATS.len())].map(Ruleset::from);
            }

            matches.push(generated);
            match_id += 1;
        }

        matches.shuffle(&mut rng);
        tournaments.push(generate_tournament(i as i32 + 1, tournament_date, ruleset, matches));
    }

    tournaments.shuffle(&mut rng);
    tournaments
}
