//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own throwaway home directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command under `home` and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_strollscroll-cli"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("STROLLSCROLL_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn status(home: &TempDir) -> serde_json::Value {
    let stdout = run_cli_success(home, &["progress", "status"]);
    serde_json::from_str(&stdout).expect("status is JSON")
}

#[test]
fn test_fresh_status() {
    let home = TempDir::new().unwrap();
    let state = status(&home);
    assert_eq!(state["currentStreak"], 0);
    assert_eq!(state["totalCredits"], 0);
    assert_eq!(state["lastGoalDate"], "");
    assert_eq!(state["achievements"].as_array().unwrap().len(), 9);
}

#[test]
fn test_record_goal_day() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(&home, &["steps", "record", "12000", "--seed", "1", "--json"]);
    let events: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let types: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["type"].as_str())
        .collect();
    assert!(types.contains(&"QuestCompleted"));
    assert!(types.contains(&"AchievementUnlocked"));

    let state = status(&home);
    assert_eq!(state["currentStreak"], 1);
    assert_eq!(state["daysMetGoal"], 1);
    assert_eq!(state["totalStepsAllTime"], 12000);
}

#[test]
fn test_repeat_reading_keeps_streak() {
    let home = TempDir::new().unwrap();
    run_cli_success(&home, &["steps", "record", "10000", "--seed", "2"]);
    let stdout = run_cli_success(&home, &["steps", "record", "10000", "--seed", "2"]);
    assert!(stdout.contains("streak: 1"));
    assert_eq!(status(&home)["daysMetGoal"], 1);
}

#[test]
fn test_simulate_crosses_goal() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(
        &home,
        &["steps", "simulate", "--ticks", "50", "--from", "9990", "--seed", "7"],
    );
    assert!(stdout.contains("Achievement Unlocked"));
    assert_eq!(status(&home)["currentStreak"], 1);
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_cli_success(&home, &["config", "get", "goal.daily_goal"]).trim(), "10000");
    run_cli_success(&home, &["config", "set", "goal.daily_goal", "5000"]);
    assert_eq!(run_cli_success(&home, &["config", "get", "goal.daily_goal"]).trim(), "5000");

    let (_, stderr, code) = run_cli(&home, &["config", "set", "goal.daily_goal", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(&home, &["config", "get", "goal.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_record_rejects_zero_goal_flag() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["steps", "record", "0", "--goal", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--goal"));

    let state = status(&home);
    assert_eq!(state["currentStreak"], 0);
    assert_eq!(state["daysMetGoal"], 0);
}

#[test]
fn test_record_rejects_zero_goal_in_config_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("strollscroll");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[goal]\ndaily_goal = 0\n").unwrap();

    let (_, stderr, code) = run_cli(&home, &["steps", "record", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("goal.daily_goal"));
}

#[test]
fn test_config_rejects_out_of_range_rate() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&home, &["config", "set", "conversion.steps_per_minute", "10"]);
    assert_ne!(code, 0);
    run_cli_success(&home, &["config", "set", "conversion.steps_per_minute", "200"]);
    assert_eq!(run_cli_success(&home, &["progress", "balance", "15000"]).trim(), "1h 15m");
}

#[test]
fn test_balance() {
    let home = TempDir::new().unwrap();
    assert_eq!(run_cli_success(&home, &["progress", "balance", "15000"]).trim(), "2h 30m");
}

#[test]
fn test_restrictions_pin_flow() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&home, &["restrictions", "set-pin", "12a4"]);
    assert_ne!(code, 0);

    run_cli_success(&home, &["restrictions", "set-pin", "1234"]);
    let (_, _, code) = run_cli(&home, &["restrictions", "verify", "0000"]);
    assert_ne!(code, 0);
    run_cli_success(&home, &["restrictions", "verify", "1234"]);

    let (_, _, code) = run_cli(&home, &["restrictions", "toggle", "instagram"]);
    assert_ne!(code, 0);
    run_cli_success(&home, &["restrictions", "toggle", "instagram", "--pin", "1234"]);

    let stdout = run_cli_success(&home, &["restrictions", "list", "--json"]);
    let apps: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let instagram = apps
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "instagram")
        .unwrap();
    assert_eq!(instagram["restricted"], true);
    assert!(!stdout.contains("1234"));
}

#[test]
fn test_minigame_catcher_once_per_day() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(&home, &["minigame", "play", "catcher", "31"]);
    assert!(stdout.contains("+15 credits"));
    assert_eq!(status(&home)["totalCredits"], 15);

    let (_, _, code) = run_cli(&home, &["minigame", "play", "catcher", "31"]);
    assert_ne!(code, 0);
    run_cli_success(&home, &["minigame", "play", "race", "900"]);
    assert_eq!(status(&home)["totalCredits"], 25);
}

#[test]
fn test_onboarding_projection() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(
        &home,
        &["onboarding", "complete", "--age", "25", "--daily-hours", "4"],
    );
    assert!(stdout.contains("87600 hours"));

    let shown: serde_json::Value =
        serde_json::from_str(&run_cli_success(&home, &["onboarding", "show"])).unwrap();
    assert_eq!(shown["profile"]["completed"], true);
    assert_eq!(shown["lifeOnScreen"]["totalHours"], 87600);
}

#[test]
fn test_progress_reset() {
    let home = TempDir::new().unwrap();
    run_cli_success(&home, &["steps", "record", "12000", "--seed", "3"]);
    run_cli_success(&home, &["progress", "reset"]);
    let state = status(&home);
    assert_eq!(state["currentStreak"], 0);
    assert_eq!(state["totalCredits"], 0);
}
