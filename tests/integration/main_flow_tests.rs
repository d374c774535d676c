use serial_test::serial;
use std::process::Command;

const BINARY: &str = env!("CARGO_BIN_EXE_leaderboard-processor");

/// Test that the application exits with error code when database connection fails
#[test]
#[serial]
fn test_application_exits_on_connection_failure() {
    let output = Command::new(BINARY)
        .arg("process")
        .env(
            "CONNECTION_STRING",
            "host=invalid_host port=5432 user=postgres password=wrong dbname=nonexistent"
        )
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    assert!(!output.status.success(), "Process should fail with invalid connection");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to connect to database"),
        "Should log connection error"
    );
    assert!(
        stderr.contains("Application cannot start without a valid database connection"),
        "Should log clear message about needing database connection"
    );
}

/// Test that the application handles missing CONNECTION_STRING environment variable
#[test]
#[serial]
fn test_application_exits_on_missing_connection_string() {
    // Run from a directory without a .env file
    let temp_dir = std::env::temp_dir().join("leaderboard_processor_test");
    std::fs::create_dir_all(&temp_dir).ok();

    let output = Command::new(BINARY)
        .arg("process")
        .current_dir(&temp_dir)
        .env_remove("CONNECTION_STRING")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    std::fs::remove_dir_all(&temp_dir).ok();

    assert!(!output.status.success(), "Process should fail without connection string");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--connection-string"),
        "Should report the missing connection string"
    );
}

#[test]
#[serial]
fn test_application_rejects_unknown_subcommand() {
    let output = Command::new(BINARY)
        .arg("recalculate")
        .env("CONNECTION_STRING", "host=localhost")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute processor");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("recalculate"));
}
