//! Integration tests for the stride binary.
//!
//! These tests verify end-to-end behavior including:
//! - Logging workouts through the full click-and-submit path
//! - Validation failures leaving storage untouched
//! - Deletion, reset, export
//! - Persistence across invocations

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("stride"))
}

/// Log a 5 km / 25 min run and return its id
fn log_run(data_dir: &Path) -> String {
    let output = cli()
        .arg("log")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--lat")
        .arg("51.51")
        .arg("--lng")
        .arg("-0.1")
        .arg("--distance")
        .arg("5")
        .arg("--duration")
        .arg("25")
        .arg("--cadence")
        .arg("180")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("✓ Logged workout "))
        .expect("log output should name the new workout")
        .trim()
        .to_string()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Map-based workout log"));
}

#[test]
fn test_log_running_writes_snapshot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_run(&data_dir);

    let snapshot_path = data_dir.join("workouts.json");
    assert!(snapshot_path.exists());

    let raw = fs::read_to_string(&snapshot_path).expect("Failed to read snapshot");
    let workouts: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = workouts.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["kind"], "running");
    assert_eq!(records[0]["distance_km"], 5.0);
    assert_eq!(records[0]["pace_min_per_km"], 5.0);
}

#[test]
fn test_log_prints_summary() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--lat")
        .arg("48.85")
        .arg("--lng")
        .arg("2.35")
        .arg("--kind")
        .arg("cycling")
        .arg("--distance")
        .arg("20")
        .arg("--duration")
        .arg("60")
        .arg("--elevation")
        .arg("400")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycling on"))
        .stdout(predicate::str::contains("km/h"));
}

#[test]
fn test_list_preserves_insertion_order() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_run(&data_dir);
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--lat")
        .arg("48.85")
        .arg("--lng")
        .arg("2.35")
        .arg("--kind")
        .arg("cycling")
        .arg("--distance")
        .arg("20")
        .arg("--duration")
        .arg("60")
        .arg("--elevation")
        .arg("400")
        .assert()
        .success();

    // Hydrated from storage in a fresh process
    let output = cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let run_pos = stdout.find("Running on").expect("run entry missing");
    let ride_pos = stdout.find("Cycling on").expect("ride entry missing");
    assert!(run_pos < ride_pos, "entries out of insertion order");
}

#[test]
fn test_invalid_distance_leaves_storage_untouched() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--lat")
        .arg("51.51")
        .arg("--lng")
        .arg("-0.1")
        .arg("--distance")
        .arg("-1")
        .arg("--duration")
        .arg("25")
        .arg("--cadence")
        .arg("180")
        .assert()
        .success()
        .stderr(predicate::str::contains("Inputs have to be positive numbers!"));

    assert!(!data_dir.join("workouts.json").exists());

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));
}

#[test]
fn test_missing_variant_field_is_rejected() {
    let temp_dir = setup_test_dir();

    // Cycling without --elevation
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--lat")
        .arg("48.85")
        .arg("--lng")
        .arg("2.35")
        .arg("--kind")
        .arg("cycling")
        .arg("--distance")
        .arg("20")
        .arg("--duration")
        .arg("60")
        .assert()
        .success()
        .stderr(predicate::str::contains("positive numbers"));

    assert!(!temp_dir.path().join("workouts.json").exists());
}

#[test]
fn test_unknown_kind_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--lat")
        .arg("0")
        .arg("--lng")
        .arg("0")
        .arg("--kind")
        .arg("swimming")
        .arg("--distance")
        .arg("1")
        .arg("--duration")
        .arg("30")
        .assert()
        .failure();
}

#[test]
fn test_delete_removes_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let id = log_run(&data_dir);

    cli()
        .arg("delete")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted workout"));

    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));

    // Deleting again is a no-op
    cli()
        .arg("delete")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout with id"));
}

#[test]
fn test_reset_clears_storage() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_run(&data_dir);
    assert!(data_dir.join("workouts.json").exists());

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all stored workouts"));

    assert!(!data_dir.join("workouts.json").exists());

    // Next startup hydrates empty
    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));
}

#[test]
fn test_focus_counts_views() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let id = log_run(&data_dir);

    cli()
        .arg("focus")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Centred map on Running on"));

    // The interaction counter persisted with the record
    cli()
        .arg("list")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("viewed 1 time"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    log_run(&data_dir);
    log_run(&data_dir);

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 workout(s)"));

    let csv_path = data_dir.join("workouts.csv");
    assert!(csv_path.exists());

    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.starts_with("id,kind,date"));
    assert_eq!(contents.lines().count(), 3); // header + 2 rows
}

#[test]
fn test_default_command_lists() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts logged yet."));
}
