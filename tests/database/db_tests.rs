use leaderboard_processor::{
    config::{DecayConfig, ProcessorConfig},
    database::{db::DbClient, HistorySource, SnapshotStore},
    model::{
        leaderboard_model::Leaderboards,
        structures::{leaderboard_type::LeaderboardType, match_outcome::MatchOutcome, ruleset::Ruleset}
    },
    pipeline,
    utils::test_utils::{date, generate_leaderboard_entry}
};
use serial_test::serial;

use super::test_helpers::TestDatabase;
use crate::common::init_test_env;

fn unlimited() -> ProcessorConfig {
    ProcessorConfig {
        tournament_limit: 0,
        ..Default::default()
    }
}

async fn seeded_client() -> (TestDatabase, DbClient) {
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    test_db.seed_test_data().await.expect("Failed to seed test data");

    let db_client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    (test_db, db_client)
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_get_tournaments() {
    init_test_env();
    let (_test_db, db_client) = seeded_client().await;

    let tournaments = db_client.tournaments().await.unwrap();

    // Date first, then id
    let ids = tournaments.iter().map(|t| t.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 4, 3, 5]);

    assert_eq!(tournaments[0].name, "Seeded Cup");
    assert_eq!(tournaments[0].date, date(2023, 1, 1));
    assert_eq!(tournaments[0].ruleset, Ruleset::Seeded);
    assert_eq!(tournaments[0].matches.len(), 2);
    assert_eq!(tournaments[0].matches[0].winner.as_deref(), Some("Alice"));
    assert_eq!(tournaments[0].matches[0].outcome, MatchOutcome::Decisive);
    assert_eq!(tournaments[0].matches[1].outcome, MatchOutcome::Draw);

    // Deleted loser
    assert_eq!(tournaments[1].matches[1].loser, None);

    // Sub-formats, blank counts as none
    assert_eq!(tournaments[2].ruleset, Ruleset::Multiple);
    assert_eq!(tournaments[2].matches[0].ruleset, Some(Ruleset::Seeded));
    assert_eq!(tournaments[2].matches[1].ruleset, None);

    assert_eq!(tournaments[4].ruleset, Ruleset::Mixed);
    assert!(tournaments[4].matches.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_get_last_active_dates() {
    init_test_env();
    let (_test_db, db_client) = seeded_client().await;

    let dates = db_client.last_active_dates().await.unwrap();

    assert_eq!(dates.len(), 4);
    assert_eq!(dates["alice"], date(2023, 3, 1));
    assert_eq!(dates["bob"], date(2023, 2, 1));
    assert_eq!(dates["carol"], date(2023, 2, 1));
    assert_eq!(dates["dave"], date(2023, 3, 1));
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_recompute_and_read_back() {
    init_test_env();
    let (_test_db, mut db_client) = seeded_client().await;

    let computed = pipeline::recompute(&mut db_client, unlimited(), false)
        .await
        .unwrap();

    assert_eq!(computed.mixed.len(), 3);
    assert_eq!(computed.seeded.len(), 3);
    assert_eq!(computed.unseeded.len(), 2);

    for leaderboard_type in [LeaderboardType::Mixed, LeaderboardType::Seeded, LeaderboardType::Unseeded] {
        let stored = db_client.leaderboard(leaderboard_type).await.unwrap();
        assert_eq!(stored, computed.get(leaderboard_type));
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_dry_run_does_not_write() {
    init_test_env();
    let (_test_db, mut db_client) = seeded_client().await;

    pipeline::recompute(&mut db_client, unlimited(), true).await.unwrap();

    assert!(db_client.leaderboard(LeaderboardType::Mixed).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_failed_replace_keeps_previous_snapshot() {
    init_test_env();
    let (_test_db, mut db_client) = seeded_client().await;

    let computed = pipeline::recompute(&mut db_client, unlimited(), false)
        .await
        .unwrap();

    // Mixed is written before the seeded row with an unknown player fails
    let mut broken = Leaderboards::default();
    broken.insert(
        LeaderboardType::Mixed,
        vec![generate_leaderboard_entry(LeaderboardType::Mixed, 1, "Alice", 10.0)]
    );
    broken.insert(
        LeaderboardType::Seeded,
        vec![generate_leaderboard_entry(LeaderboardType::Seeded, 1, "Nobody", 10.0)]
    );

    assert!(db_client.replace_leaderboards(&broken).await.is_err());

    for leaderboard_type in [LeaderboardType::Mixed, LeaderboardType::Seeded, LeaderboardType::Unseeded] {
        let stored = db_client.leaderboard(leaderboard_type).await.unwrap();
        assert_eq!(stored, computed.get(leaderboard_type));
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_decayed_leaderboard_from_db() {
    init_test_env();
    let (_test_db, mut db_client) = seeded_client().await;
    pipeline::recompute(&mut db_client, unlimited(), false)
        .await
        .unwrap();

    let decayed = pipeline::decayed_leaderboard(&db_client, "Seeded", date(2024, 3, 1), DecayConfig::default())
        .await
        .unwrap();

    assert_eq!(decayed.len(), 3);

    // Alice last played 2023-03-01, 366 days before
    let alice = decayed.iter().find(|row| row.entry.player == "Alice").unwrap();
    assert_eq!(alice.days_inactive, 366);
    assert!(alice.decay_amount != 0.0);

    // Bob and Carol last played 2023-02-01
    for row in decayed.iter().filter(|row| row.entry.player != "Alice") {
        assert_eq!(row.days_inactive, 394);
    }

    for (i, row) in decayed.iter().enumerate() {
        assert_eq!(row.decayed_placement, i as u32 + 1);
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn test_events_from_db() {
    init_test_env();
    let (_test_db, db_client) = seeded_client().await;

    let ids = |summaries: Vec<leaderboard_processor::database::db_structs::TournamentSummary>| {
        summaries.into_iter().map(|s| s.id).collect::<Vec<_>>()
    };

    assert_eq!(ids(pipeline::events(&db_client, "mixed").await.unwrap()), vec![5, 4, 2, 1]);
    assert_eq!(ids(pipeline::events(&db_client, "seeded").await.unwrap()), vec![4, 1]);
    assert_eq!(ids(pipeline::events(&db_client, "unseeded").await.unwrap()), vec![5, 4, 2]);
}
