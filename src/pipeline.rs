use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::info;

use crate::{
    config::{DecayConfig, ProcessorConfig},
    database::{
        db_structs::{LeaderboardEntry, TournamentSummary},
        HistorySource, SnapshotStore
    },
    error::{ProcessorError, QueryError},
    model::{
        decay::{decayed_leaderboard as decay_leaderboard, DecayedEntry},
        leaderboard_model::{LeaderboardModel, Leaderboards},
        router::contributes_to,
        structures::{leaderboard_type::LeaderboardType, rating::Rating}
    }
};

/// Resolves a leaderboard name given by a caller, e.g. `"Seeded"` or `"mixed"`.
pub fn parse_leaderboard_type(name: &str) -> Result<LeaderboardType, QueryError> {
    LeaderboardType::from_str(name.trim()).map_err(|_| QueryError::UnknownLeaderboard(name.to_string()))
}

/// Recomputes all leaderboards from the full history and, unless `dry_run` is
/// set, replaces the stored snapshots with the result.
///
/// The configuration is validated before the history is read.
pub async fn recompute<S>(store: &mut S, config: ProcessorConfig, dry_run: bool) -> Result<Leaderboards, ProcessorError>
where
    S: HistorySource + SnapshotStore
{
    let model = LeaderboardModel::with_config(config)?;

    let tournaments = store.tournaments().await?;
    let leaderboards = model.process(&tournaments);

    if dry_run {
        for (leaderboard_type, entries) in leaderboards.iter() {
            info!("[dry run] {} leaderboard: {} entries", leaderboard_type, entries.len());
        }

        info!("Dry run complete, leaderboards were not saved");
        return Ok(leaderboards);
    }

    store.replace_leaderboards(&leaderboards).await?;
    info!("Recompute complete, {} leaderboard entries saved", leaderboards.len());

    Ok(leaderboards)
}

/// Stored leaderboard re-ranked by inactivity decay as of `as_of`.
pub async fn decayed_leaderboard<S>(
    store: &S,
    leaderboard: &str,
    as_of: NaiveDate,
    config: DecayConfig
) -> Result<Vec<DecayedEntry>, ProcessorError>
where
    S: HistorySource + SnapshotStore
{
    config.validate()?;
    let leaderboard_type = parse_leaderboard_type(leaderboard)?;

    let entries = store.leaderboard(leaderboard_type).await?;
    let last_active = store.last_active_dates().await?;

    Ok(decay_leaderboard(&entries, &last_active, as_of, &config))
}

/// Stored leaderboard without decay, ordered by placement
pub async fn leaderboard<S: SnapshotStore>(store: &S, leaderboard: &str) -> Result<Vec<LeaderboardEntry>, ProcessorError> {
    let leaderboard_type = parse_leaderboard_type(leaderboard)?;

    Ok(store.leaderboard(leaderboard_type).await?)
}

/// Player name to rating for one stored leaderboard, in placement order
pub async fn ratings<S: SnapshotStore>(store: &S, leaderboard: &str) -> Result<IndexMap<String, Rating>, ProcessorError> {
    let entries = self::leaderboard(store, leaderboard).await?;

    Ok(entries
        .into_iter()
        .map(|entry| (entry.player, Rating::new(entry.mu, entry.sigma)))
        .collect())
}

/// Tournaments that can feed a leaderboard, newest first
pub async fn events<S: HistorySource>(store: &S, leaderboard: &str) -> Result<Vec<TournamentSummary>, ProcessorError> {
    let leaderboard_type = parse_leaderboard_type(leaderboard)?;
    let tournaments = store.tournaments().await?;

    Ok(tournaments
        .iter()
        .filter(|t| contributes_to(&t.ruleset, leaderboard_type))
        .sorted_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)))
        .map(TournamentSummary::from)
        .collect())
}
