//! Basic CLI E2E tests.
//!
//! Tests invoke the built `luna` binary against a throwaway data directory
//! and verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_luna"))
        .args(args)
        .env("LUNA_HOME", home)
        .env_remove("LUNA_LOG")
        .env_remove("LUNA_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and parse stdout as JSON.
fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (stdout, stderr, code) = run_cli(home, &full);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_without_records_is_awaiting() {
    let home = TempDir::new().unwrap();
    let status = run_json(home.path(), &["--date", "2024-01-20", "status"]);
    assert_eq!(status["status"]["phase"]["state"], "awaiting");
    assert_eq!(status["status"]["phase"]["reason"], "no_records");
    assert!(status["insight"].as_str().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_start_end_and_status() {
    let home = TempDir::new().unwrap();
    let started = run_json(home.path(), &["--date", "2024-01-01", "period", "start"]);
    assert_eq!(started["outcome"], "inserted");

    let ended = run_json(home.path(), &["--date", "2024-01-06", "period", "end", "--yesterday"]);
    assert_eq!(ended["outcome"], "closed");
    assert_eq!(ended["endDate"], "2024-01-05");

    let status = run_json(home.path(), &["--date", "2024-01-20", "status"]);
    assert_eq!(status["status"]["cycleDay"], 20);
    assert_eq!(status["status"]["periodOngoing"], false);
    assert_eq!(status["status"]["phase"]["phase"], "Luteal");
    assert!(home.path().join("luna.json").exists());
}

#[test]
fn test_end_after_period_is_over_changes_nothing() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["--date", "2024-01-01", "period", "start"]);
    run_json(home.path(), &["--date", "2024-01-06", "period", "end"]);

    let again = run_json(home.path(), &["--date", "2024-01-25", "period", "end"]);
    assert_eq!(again["outcome"], "not_ongoing");
    assert_eq!(again["startDate"], "2024-01-01");

    let status = run_json(home.path(), &["--date", "2024-01-20", "status"]);
    assert_eq!(status["status"]["periodOngoing"], false);
    assert_eq!(status["status"]["phase"]["phase"], "Luteal");
}

#[test]
fn test_json_keys_are_camel_case() {
    let home = TempDir::new().unwrap();
    let started = run_json(home.path(), &["--date", "2024-01-01", "period", "start"]);
    assert_eq!(started["startDate"], "2024-01-01");
    assert!(started.get("start_date").is_none());

    let status = run_json(home.path(), &["--date", "2024-01-03", "status"]);
    assert_eq!(status["status"]["cycleDay"], 3);
    assert!(status["status"].get("cycle_day").is_none());
    assert!(status["status"].get("loveCount").is_some());
    assert!(status["info"].get("daysRange").is_some());

    let month = run_json(home.path(), &["--date", "2024-01-03", "calendar"]);
    let cell = month["cells"].as_array().unwrap().iter().find(|c| !c.is_null()).unwrap();
    assert!(cell.get("loveTier").is_some());
    assert!(cell.get("love_tier").is_none());
}

#[test]
fn test_shift_moves_reference() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["--date", "2024-01-01", "period", "start"]);
    let status = run_json(home.path(), &["--date", "2024-01-01", "--shift", "13", "status"]);
    assert_eq!(status["status"]["reference"], "2024-01-14");
    assert_eq!(status["status"]["phase"]["phase"], "Ovulation");
}

#[test]
fn test_love_and_intimacy() {
    let home = TempDir::new().unwrap();
    for expected in 1..=3 {
        let love = run_json(home.path(), &["--date", "2024-03-03", "love"]);
        assert_eq!(love["loveCount"], expected);
    }
    let toggled = run_json(home.path(), &["--date", "2024-03-03", "intimacy"]);
    assert_eq!(toggled["intimacy"], true);

    let log = run_json(home.path(), &["log", "show", "2024-03-03"]);
    assert_eq!(log["loveCount"], 3);
    assert_eq!(log["intimacy"], true);
}

#[test]
fn test_log_set_keeps_love_count() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["--date", "2024-03-03", "love"]);
    let log = run_json(
        home.path(),
        &[
            "log", "set", "2024-03-03", "--flow", "light", "--mood", "Calm", "--symptom", "cramps",
            "--note", "tea",
        ],
    );
    assert_eq!(log["flow"], "Light");
    assert_eq!(log["mood"], serde_json::json!(["calm"]));
    assert_eq!(log["note"], "tea");
    assert_eq!(log["loveCount"], 1);
}

#[test]
fn test_log_set_can_clear_tags() {
    let home = TempDir::new().unwrap();
    run_json(
        home.path(),
        &["log", "set", "2024-03-03", "--mood", "calm", "--symptom", "cramps", "--note", "tea"],
    );
    let log = run_json(
        home.path(),
        &["log", "set", "2024-03-03", "--clear-moods", "--clear-symptoms"],
    );
    assert_eq!(log["mood"], serde_json::json!([]));
    assert_eq!(log["symptoms"], serde_json::json!([]));
    assert_eq!(log["note"], "tea");

    let log = run_json(home.path(), &["log", "set", "2024-03-03", "--clear-moods", "--mood", "tired"]);
    assert_eq!(log["mood"], serde_json::json!(["tired"]));
}

#[test]
fn test_calendar_marks_period_days() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["--date", "2024-05-02", "period", "start"]);
    let month = run_json(home.path(), &["--date", "2024-05-03", "calendar"]);
    assert_eq!(month["title"], "May 2024");

    let cells = month["cells"].as_array().unwrap();
    // 2024-05-01 is a Wednesday.
    assert!(cells[..3].iter().all(|c| c.is_null()));
    assert_eq!(cells[3 + 1]["flow"], "Medium");
    assert_eq!(cells[3 + 2]["isReference"], true);
}

#[test]
fn test_calendar_month_and_offset() {
    let home = TempDir::new().unwrap();
    let month = run_json(home.path(), &["calendar", "--month", "2024-12", "--offset", "1"]);
    assert_eq!(month["title"], "January 2025");
}

#[test]
fn test_calendar_offset_out_of_range_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["calendar", "--offset", "5000000"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "cycle.safety_period_limit_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "cycle.safety_period_limit_days", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "cycle.safety_period_limit_days"]);
    assert_eq!(stdout.trim(), "5");

    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "cycle.safety_period_limit_days", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_invalid_date_flag_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["--date", "2024-13-40", "status"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid date"));
}

#[test]
fn test_unknown_config_key_fails() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "cycle.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}
