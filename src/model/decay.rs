use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{config::DecayConfig, database::db_structs::LeaderboardEntry, model::rating_tracker::player_key};

/// A stored leaderboard row decorated with its inactivity penalty.
/// Computed on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayedEntry {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub last_active: Option<NaiveDate>,
    pub days_inactive: i64,
    pub decay_amount: f64,
    pub adjusted_exposure: f64,
    /// 1-based rank by `adjusted_exposure`
    pub decayed_placement: u32
}

/// # How this works
/// - `days_inactive` is the number of days between the player's last active
///     date and `as_of`.
/// - Below `days_inactive_threshold` nothing happens.
/// - From the threshold on, the player loses `days_inactive / total_decay_days`
///     of their exposure. The fraction is not capped, so very long inactivity
///     drives the adjusted exposure below zero.
///
/// Players without a known last active date are never decayed.
///
/// The returned row keeps its stored placement as `decayed_placement` until
/// [`decayed_leaderboard`] re-ranks the whole pool.
pub fn decay(
    entry: &LeaderboardEntry,
    last_active: Option<NaiveDate>,
    as_of: NaiveDate,
    config: &DecayConfig
) -> DecayedEntry {
    let days_inactive = last_active.map_or(0, |last_active| (as_of - last_active).num_days());

    let decay_amount = if last_active.is_none() || days_inactive < i64::from(config.days_inactive_threshold) {
        0.0
    } else {
        let penalty = days_inactive as f64 / f64::from(config.total_decay_days);
        entry.exposure * penalty
    };

    DecayedEntry {
        entry: entry.clone(),
        last_active,
        days_inactive,
        decay_amount,
        adjusted_exposure: entry.exposure - decay_amount,
        decayed_placement: entry.placement
    }
}

/// Decays every row of one stored leaderboard and ranks the result by
/// adjusted exposure. Ties keep the stored placement order, then fall back to
/// the player identity.
///
/// `last_active` is keyed by normalized player identity.
pub fn decayed_leaderboard(
    entries: &[LeaderboardEntry],
    last_active: &HashMap<String, NaiveDate>,
    as_of: NaiveDate,
    config: &DecayConfig
) -> Vec<DecayedEntry> {
    entries
        .iter()
        .map(|entry| {
            let last_active = last_active.get(&player_key(&entry.player)).copied();
            decay(entry, last_active, as_of, config)
        })
        .sorted_by(|a, b| {
            b.adjusted_exposure
                .total_cmp(&a.adjusted_exposure)
                .then_with(|| a.entry.placement.cmp(&b.entry.placement))
                .then_with(|| player_key(&a.entry.player).cmp(&player_key(&b.entry.player)))
        })
        .enumerate()
        .map(|(i, mut decayed)| {
            decayed.decayed_placement = i as u32 + 1;
            decayed
        })
        .collect()
}
