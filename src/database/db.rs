use std::collections::HashMap;

use chrono::NaiveDate;
use postgres_types::ToSql;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{error, info};

use super::{
    db_structs::{LeaderboardEntry, Match, Tournament},
    HistorySource, SnapshotStore
};
use crate::{
    error::StoreError,
    model::{
        leaderboard_model::Leaderboards,
        rating_tracker::player_key,
        structures::{leaderboard_type::LeaderboardType, match_outcome::MatchOutcome, ruleset::Ruleset}
    },
    utils::progress_utils::progress_bar
};

pub struct DbClient {
    client: Client
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, StoreError> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient { client })
    }

    fn tournament_from_row(row: &Row) -> Result<Tournament, StoreError> {
        Ok(Tournament {
            id: row.try_get("tournament_id")?,
            name: row.try_get("tournament_name")?,
            date: row.try_get("tournament_date")?,
            ruleset: Ruleset::from(row.try_get::<_, String>("tournament_ruleset")?),
            matches: Vec::new()
        })
    }

    /// Tournaments without matches produce a single row with a NULL match id
    fn match_from_row(row: &Row) -> Result<Option<Match>, StoreError> {
        let Some(id) = row.try_get::<_, Option<i32>>("match_id")? else {
            return Ok(None);
        };

        let score = row.try_get::<_, Option<String>>("match_score")?.unwrap_or_default();
        let ruleset = row
            .try_get::<_, Option<String>>("match_ruleset")?
            .filter(|ruleset| !ruleset.trim().is_empty())
            .map(Ruleset::from);

        Ok(Some(Match {
            id,
            tournament_id: row.try_get("tournament_id")?,
            winner: row.try_get("winner_name")?,
            loser: row.try_get("loser_name")?,
            outcome: MatchOutcome::from_score(&score),
            ruleset
        }))
    }

    fn entry_from_row(leaderboard_type: LeaderboardType, row: &Row) -> Result<LeaderboardEntry, StoreError> {
        Ok(LeaderboardEntry {
            leaderboard_type,
            placement: unsigned(row, "placement")?,
            player: row.try_get("player_name")?,
            exposure: row.try_get("exposure")?,
            mu: row.try_get("mu")?,
            sigma: row.try_get("sigma")?,
            tournaments_played: unsigned(row, "tournaments_played")?,
            matches_played: unsigned(row, "matches_played")?
        })
    }
}

fn unsigned(row: &Row, column: &'static str) -> Result<u32, StoreError> {
    let value = row.try_get::<_, i32>(column)?;

    u32::try_from(value).map_err(|_| StoreError::InvalidValue {
        column,
        value: value.to_string()
    })
}

impl HistorySource for DbClient {
    /// Fetches every tournament with its matches in processing order.
    /// Participants are resolved to player names, a missing player yields `None`.
    async fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        info!("Fetching tournaments...");
        let rows = self
            .client
            .query(
                "SELECT
                    t.id AS tournament_id, t.name AS tournament_name, t.date AS tournament_date,
                    t.ruleset AS tournament_ruleset,
                    m.id AS match_id, m.score AS match_score, m.ruleset AS match_ruleset,
                    w.name AS winner_name, l.name AS loser_name
                FROM tournaments t
                    LEFT JOIN matches m ON m.tournament_id = t.id
                    LEFT JOIN players w ON w.id = m.winner_id
                    LEFT JOIN players l ON l.id = m.loser_id
                ORDER BY t.date, t.id, m.id",
                &[]
            )
            .await?;

        info!("Tournaments fetched, iterating...");

        let mut tournaments: Vec<Tournament> = Vec::new();
        for row in &rows {
            let tournament_id = row.try_get::<_, i32>("tournament_id")?;

            if tournaments.last().map(|t| t.id) != Some(tournament_id) {
                tournaments.push(Self::tournament_from_row(row)?);
            }

            if let (Some(match_), Some(tournament)) = (Self::match_from_row(row)?, tournaments.last_mut()) {
                tournament.matches.push(match_);
            }
        }

        info!(
            "Fetched {} tournaments with {} matches",
            tournaments.len(),
            tournaments.iter().map(|t| t.matches.len()).sum::<usize>()
        );
        Ok(tournaments)
    }

    async fn last_active_dates(&self) -> Result<HashMap<String, NaiveDate>, StoreError> {
        info!("Fetching last active dates...");
        let rows = self
            .client
            .query(
                "SELECT p.name AS player_name, MAX(t.date) AS last_active
                FROM players p
                    JOIN matches m ON p.id = m.winner_id OR p.id = m.loser_id
                    JOIN tournaments t ON t.id = m.tournament_id
                GROUP BY p.name",
                &[]
            )
            .await?;

        // Names differing only in case collapse onto one identity
        let mut dates: HashMap<String, NaiveDate> = HashMap::new();
        for row in &rows {
            let name = row.try_get::<_, String>("player_name")?;
            let last_active = row.try_get::<_, NaiveDate>("last_active")?;

            dates
                .entry(player_key(&name))
                .and_modify(|date| *date = (*date).max(last_active))
                .or_insert(last_active);
        }

        info!("Found last active dates for {} players", dates.len());
        Ok(dates)
    }
}

impl SnapshotStore for DbClient {
    /// Replaces all three leaderboards inside one transaction. Nothing is
    /// committed if any row fails to insert.
    async fn replace_leaderboards(&mut self, leaderboards: &Leaderboards) -> Result<(), StoreError> {
        let bar = progress_bar(leaderboards.len() as u64, "Saving leaderboards to db");
        let transaction = self.client.transaction().await?;

        let insert = transaction
            .prepare(
                "INSERT INTO leaderboards (leaderboard_type, placement, player_id, exposure, mu, sigma, \
                tournaments_played, matches_played) \
                VALUES ($1, $2, (SELECT id FROM players WHERE lower(name) = lower($3) ORDER BY id LIMIT 1), \
                $4, $5, $6, $7, $8)"
            )
            .await?;

        for (leaderboard_type, entries) in leaderboards.iter() {
            let leaderboard_type = leaderboard_type.to_string();

            transaction
                .execute(
                    "DELETE FROM leaderboards WHERE leaderboard_type = $1",
                    &[&leaderboard_type]
                )
                .await?;

            for entry in entries {
                let placement = entry.placement as i32;
                let tournaments_played = entry.tournaments_played as i32;
                let matches_played = entry.matches_played as i32;

                let params: [&(dyn ToSql + Sync); 8] = [
                    &leaderboard_type,
                    &placement,
                    &entry.player,
                    &entry.exposure,
                    &entry.mu,
                    &entry.sigma,
                    &tournaments_played,
                    &matches_played
                ];
                transaction.execute(&insert, &params).await?;
                bar.inc(1);
            }

            info!("Saved {} {} leaderboard entries", entries.len(), leaderboard_type);
        }

        transaction.commit().await?;
        bar.finish();

        info!("Leaderboards saved");
        Ok(())
    }

    async fn leaderboard(&self, leaderboard_type: LeaderboardType) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let type_name = leaderboard_type.to_string();
        let rows = self
            .client
            .query(
                "SELECT l.placement, p.name AS player_name, l.exposure, l.mu, l.sigma, \
                l.tournaments_played, l.matches_played \
                FROM leaderboards l \
                JOIN players p ON p.id = l.player_id \
                WHERE l.leaderboard_type = $1 \
                ORDER BY l.placement",
                &[&type_name]
            )
            .await?;

        rows.iter()
            .map(|row| Self::entry_from_row(leaderboard_type, row))
            .collect()
    }
}
