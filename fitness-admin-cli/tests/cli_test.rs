use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// Nothing listens on the discard port, so every request fails to connect
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn fitness_admin(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fitness-admin").unwrap();
    cmd.env("FITNESS_ADMIN_CONFIG", config)
        .env_remove("FITNESS_ADMIN_API_URL")
        .env_remove("FITNESS_ADMIN_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("fitness-admin").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Admin console for the fitness platform"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("groups"))
        .stdout(predicate::str::contains("trainers"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("fitness-admin").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("fitness-admin").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_fitness-admin"));
}

#[test]
fn test_login_and_logout_roundtrip() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["login", "--token", "abc123"])
        .assert()
        .success();
    let contents = std::fs::read_to_string(&config).unwrap();
    assert!(contents.contains("abc123"));

    fitness_admin(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("abc123").not());

    fitness_admin(&config).arg("logout").assert().success();
    let contents = std::fs::read_to_string(&config).unwrap();
    assert!(!contents.contains("abc123"));
}

#[test]
fn test_groups_fall_back_to_sample_data() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "groups", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline mode"))
        .stdout(predicate::str::contains("Morning HIIT"))
        .stdout(predicate::str::contains("4 group(s)"));
}

#[test]
fn test_workouts_without_fallback_report_failure() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "workouts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch workouts"));

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "workouts", "--sample-fallback", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabata Blast"));
}

#[test]
fn test_organizer_cannot_be_removed() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "groups", "remove-member", "4", "5", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("organizer cannot be removed"));
}

#[test]
fn test_stats_json_offline() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_groups\": 4"))
        .stdout(predicate::str::contains("\"total_users\": 3"));
}

#[test]
fn test_trainers_offline() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    fitness_admin(&config)
        .args(["--api-url", UNREACHABLE_API, "trainers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"))
        .stdout(predicate::str::contains("1 trainer(s)"));
}
