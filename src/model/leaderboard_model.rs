use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::{
    config::ProcessorConfig,
    database::db_structs::{LeaderboardEntry, Match, Tournament},
    error::ConfigError,
    model::{
        rating_tracker::{player_key, RatingTracker},
        router::{MatchRouter, Route},
        structures::{leaderboard_type::LeaderboardType, match_outcome::MatchOutcome, ruleset::Ruleset},
        trueskill::{RatingModel, TrueSkill}
    },
    utils::progress_utils::progress_bar
};

/// The three ranked pools produced by one recompute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboards {
    pub mixed: Vec<LeaderboardEntry>,
    pub seeded: Vec<LeaderboardEntry>,
    pub unseeded: Vec<LeaderboardEntry>
}

impl Leaderboards {
    pub fn get(&self, leaderboard_type: LeaderboardType) -> &[LeaderboardEntry] {
        match leaderboard_type {
            LeaderboardType::Mixed => &self.mixed,
            LeaderboardType::Seeded => &self.seeded,
            LeaderboardType::Unseeded => &self.unseeded
        }
    }

    pub fn insert(&mut self, leaderboard_type: LeaderboardType, entries: Vec<LeaderboardEntry>) {
        match leaderboard_type {
            LeaderboardType::Mixed => self.mixed = entries,
            LeaderboardType::Seeded => self.seeded = entries,
            LeaderboardType::Unseeded => self.unseeded = entries
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LeaderboardType, &[LeaderboardEntry])> {
        LeaderboardType::iter().map(move |leaderboard_type| (leaderboard_type, self.get(leaderboard_type)))
    }

    /// Total number of ranked entries across all pools
    pub fn len(&self) -> usize {
        self.mixed.len() + self.seeded.len() + self.unseeded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A match that survived validation, with its destinations already resolved
#[derive(Debug, Clone)]
struct ScheduledMatch {
    winner: String,
    loser: String,
    outcome: MatchOutcome,
    routes: Vec<Route>
}

impl ScheduledMatch {
    fn weight_in(&self, leaderboard_type: LeaderboardType) -> Option<u32> {
        self.routes
            .iter()
            .find(|route| route.leaderboard_type == leaderboard_type)
            .map(|route| route.weight)
    }
}

#[derive(Debug, Clone)]
struct ScheduledTournament {
    id: i32,
    matches: Vec<ScheduledMatch>
}

/// Maps every spelling of a player to the first one seen during a run
#[derive(Default)]
struct NameRegistry {
    spellings: HashMap<String, String>,
    reported: HashSet<String>
}

impl NameRegistry {
    fn canonical(&mut self, name: &str) -> String {
        let name = name.trim();
        let canonical = self
            .spellings
            .entry(player_key(name))
            .or_insert_with(|| name.to_string());

        if canonical != name && self.reported.insert(name.to_string()) {
            warn!("Player '{}' also appears as '{}', merging under the first spelling", canonical, name);
        }

        canonical.clone()
    }
}

/// # Leaderboard Model
///
/// Replays a full tournament history into the mixed, seeded and unseeded pools.
///
/// Steps:
/// 1. Order tournaments by `(date, id)` and their matches by `id`, drop matches
///     that cannot be rated and resolve every remaining match to its pools.
/// 2. Replay each pool's share of that schedule on its own worker. Every pool
///     sees its matches in the same global order.
/// 3. Rank each pool by exposure after dropping players below the tournament limit.
pub struct LeaderboardModel<M: RatingModel = TrueSkill> {
    config: ProcessorConfig,
    router: MatchRouter,
    model: M
}

impl LeaderboardModel<TrueSkill> {
    pub fn with_config(config: ProcessorConfig) -> Result<Self, ConfigError> {
        Self::new(config, TrueSkill::default())
    }
}

impl<M: RatingModel> LeaderboardModel<M> {
    pub fn new(config: ProcessorConfig, model: M) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(LeaderboardModel {
            router: MatchRouter::new(&config),
            config,
            model
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs a full recompute and returns the ranked pools.
    pub fn process(&self, tournaments: &[Tournament]) -> Leaderboards {
        let mut leaderboards = Leaderboards::default();

        for tracker in self.replay(tournaments) {
            let entries = tracker.leaderboard(&self.model, self.config.tournament_limit);

            info!(
                "{} leaderboard: {} of {} players ranked",
                tracker.leaderboard_type(),
                entries.len(),
                tracker.len()
            );

            leaderboards.insert(tracker.leaderboard_type(), entries);
        }

        leaderboards
    }

    /// Replays the history and returns the unranked pool states, one per
    /// leaderboard type in declaration order.
    pub fn replay(&self, tournaments: &[Tournament]) -> Vec<RatingTracker> {
        let schedule = self.schedule(tournaments);

        LeaderboardType::iter()
            .collect_vec()
            .into_par_iter()
            .map(|leaderboard_type| self.replay_pool(leaderboard_type, &schedule))
            .collect()
    }

    fn schedule(&self, tournaments: &[Tournament]) -> Vec<ScheduledTournament> {
        let n_matches = tournaments.iter().map(|t| t.matches.len()).sum::<usize>();
        let bar = progress_bar(n_matches as u64, "Routing matches");

        let mut names = NameRegistry::default();
        let mut schedule = Vec::with_capacity(tournaments.len());
        let mut n_scheduled = 0;

        for tournament in tournaments.iter().sorted_by_key(|t| (t.date, t.id)) {
            if !tournament.ruleset.is_recognized() {
                warn!(
                    "Tournament {} has unrecognized ruleset '{}', treating it as unseeded",
                    tournament.id, tournament.ruleset
                );
            }

            let mut matches = Vec::with_capacity(tournament.matches.len());
            for match_ in tournament.matches.iter().sorted_by_key(|m| m.id) {
                bar.inc(1);

                if let Some(scheduled) = self.schedule_match(tournament, match_, &mut names) {
                    matches.push(scheduled);
                }
            }

            n_scheduled += matches.len();
            schedule.push(ScheduledTournament {
                id: tournament.id,
                matches
            });
        }

        bar.finish();
        info!(
            "Scheduled {} of {} matches from {} tournaments",
            n_scheduled,
            n_matches,
            tournaments.len()
        );

        schedule
    }

    fn schedule_match(
        &self,
        tournament: &Tournament,
        match_: &Match,
        names: &mut NameRegistry
    ) -> Option<ScheduledMatch> {
        if tournament.ruleset == Ruleset::Multiple {
            match &match_.ruleset {
                None => warn!(
                    "Match {} in multiple-format tournament {} has no ruleset, skipping",
                    match_.id, tournament.id
                ),
                Some(sub_format @ (Ruleset::Multiple | Ruleset::Team)) => warn!(
                    "Match {} in multiple-format tournament {} has ruleset '{}', skipping",
                    match_.id, tournament.id, sub_format
                ),
                Some(sub_format) if !sub_format.is_recognized() => warn!(
                    "Match {} has unrecognized ruleset '{}', treating it as unseeded",
                    match_.id, sub_format
                ),
                Some(_) => {}
            }
        }

        let routes = self.router.route(&tournament.ruleset, match_.ruleset.as_ref());
        if routes.is_empty() {
            debug!("Match {} is not routed to any leaderboard", match_.id);
            return None;
        }

        let (Some(winner), Some(loser)) = (resolved(&match_.winner), resolved(&match_.loser)) else {
            warn!(
                "Match {} in tournament {} has an unresolvable participant, skipping",
                match_.id, tournament.id
            );
            return None;
        };

        if player_key(winner) == player_key(loser) {
            warn!("Match {} has '{}' playing against themself, skipping", match_.id, winner);
            return None;
        }

        Some(ScheduledMatch {
            winner: names.canonical(winner),
            loser: names.canonical(loser),
            outcome: match_.outcome,
            routes
        })
    }

    fn replay_pool(&self, leaderboard_type: LeaderboardType, schedule: &[ScheduledTournament]) -> RatingTracker {
        let mut tracker = RatingTracker::new(leaderboard_type);
        let prior = self.model.default_rating();

        for tournament in schedule {
            tracker.begin_tournament();

            for match_ in &tournament.matches {
                let Some(weight) = match_.weight_in(leaderboard_type) else {
                    continue;
                };

                tracker.record_match(&match_.winner, &match_.loser, prior);

                if !match_.outcome.is_decisive() {
                    continue;
                }

                if let Err(e) = tracker.apply_result(&self.model, &match_.winner, &match_.loser, weight) {
                    warn!(
                        "{} leaderboard: {} vs {} in tournament {} was not rated: {}",
                        leaderboard_type, match_.winner, match_.loser, tournament.id, e
                    );
                }
            }
        }

        tracker
    }
}

fn resolved(name: &Option<String>) -> Option<&str> {
    name.as_deref().map(str::trim).filter(|name| !name.is_empty())
}
