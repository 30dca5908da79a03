//! Integration tests for the ironpulse binary.
//!
//! These tests verify end-to-end behavior including:
//! - Guided workouts driven by scripted stdin
//! - Workout and meal journaling
//! - History, profile and CSV rollup

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ironpulse"))
}

fn read_journal(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .expect("Failed to read journal")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("journal line is JSON"))
        .collect()
}

fn train(data_dir: &Path, routine: &str, script: &str) -> assert_cmd::assert::Assert {
    cli()
        .arg("train")
        .arg(routine)
        .arg("--data-dir")
        .arg(data_dir)
        .write_stdin(script)
        .assert()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guided workout tracker"));
}

#[test]
fn test_routines_listed_by_default() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Push Power"))
        .stdout(predicate::str::contains("Back & Biceps"))
        .stdout(predicate::str::contains("Leg Destruction"));
}

#[test]
fn test_auto_complete_logs_every_target_set() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("train")
        .arg("push_day")
        .arg("--auto-complete")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("WORKOUT COMPLETE"))
        .stdout(predicate::str::contains("Workout logged"));

    let records = read_journal(&data_dir.join("journal/workouts.jsonl"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["type"], "Push Power");
    assert_eq!(records[0]["intensity"], "High");
    assert_eq!(records[0]["sets"], 13);
    assert_eq!(records[0]["volume"], 13 * 600);
}

#[test]
fn test_scripted_push_day_scenario() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let script = "log 60 10\nlog\nlog\nlog\nnext\nnext\nnext\nfinish\n";
    train(data_dir, "push_day", script)
        .success()
        .stdout(predicate::str::contains("Set logged: 60 kg x 10"))
        .stdout(predicate::str::contains("Workout logged"));

    let records = read_journal(&data_dir.join("journal/workouts.jsonl"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["sets"], 4);
    assert_eq!(records[0]["volume"], 2400);
}

#[test]
fn test_steppers_change_logged_values() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let script = "w+\nw+\nr-\nlog\nn\nn\nn\nf\n";
    train(data_dir, "leg_day", script)
        .success()
        .stdout(predicate::str::contains("Set logged: 70 kg x 9"));

    let records = read_journal(&data_dir.join("journal/workouts.jsonl"));
    assert_eq!(records[0]["volume"], 630);
    assert_eq!(records[0]["type"], "Leg Destruction");
}

#[test]
fn test_finish_only_on_last_exercise() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    train(data_dir, "pull_day", "log\nfinish\nquit\n")
        .success()
        .stdout(predicate::str::contains("Finish is available on the last exercise"))
        .stdout(predicate::str::contains("Session abandoned"));

    assert!(!data_dir.join("journal/workouts.jsonl").exists());
}

#[test]
fn test_end_of_input_abandons() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    train(data_dir, "push_day", "log\nlog\n")
        .success()
        .stdout(predicate::str::contains("Session abandoned"));

    assert!(!data_dir.join("journal/workouts.jsonl").exists());
}

#[test]
fn test_rest_commands() {
    let temp_dir = setup_test_dir();

    train(temp_dir.path(), "push_day", "log\nextend\nskip\nquit\n")
        .success()
        .stdout(predicate::str::contains("Rest extended: 01:30 left").or(
            // a tick may land between log and extend
            predicate::str::contains("Rest extended: 01:29 left"),
        ))
        .stdout(predicate::str::contains("Rest skipped"));
}

#[test]
fn test_unknown_routine_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("train")
        .arg("arm_day")
        .arg("--auto-complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("arm_day"));
}

#[test]
fn test_meal_preset_logged() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("meal")
        .arg("--preset")
        .arg("banana")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Meal logged: Banana (105 kcal"));

    let records = read_journal(&data_dir.join("journal/meals.jsonl"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["meal"], "Banana");
    assert_eq!(records[0]["carbs"], 27);
}

#[test]
fn test_custom_meal_requires_calories() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("meal")
        .arg("--name")
        .arg("Oats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();

    cli()
        .arg("meal")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--preset"));
}

#[test]
fn test_profile_reports_energy_and_intake() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("meal")
        .arg("--name")
        .arg("Oats")
        .arg("--calories")
        .arg("350")
        .arg("--protein")
        .arg("12")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("profile")
        .arg("--init")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile created"))
        .stdout(predicate::str::contains("BMR: 1770 kcal"))
        .stdout(predicate::str::contains("TDEE: 2743 kcal"))
        .stdout(predicate::str::contains("Today: 350 / 2800 kcal"));

    assert!(data_dir.join("profile.json").exists());
}

#[test]
fn test_profile_edit_changes_metrics() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("profile")
        .arg("--weight")
        .arg("90")
        .arg("--height")
        .arg("190")
        .arg("--age")
        .arg("30")
        .arg("--goal")
        .arg("lose-weight")
        .arg("--calorie-target")
        .arg("2200")
        .arg("--protein-target")
        .arg("100")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated"))
        // 900 + 1187.5 - 150 + 5
        .stdout(predicate::str::contains("BMR: 1942 kcal"))
        .stdout(predicate::str::contains("BMI: 24.9"))
        .stdout(predicate::str::contains("Goal: lose weight"))
        .stdout(predicate::str::contains("0 / 2200 kcal (0%)"))
        .stdout(predicate::str::contains("protein 0 / 100 g (0%)"));

    // Edits persist and untouched fields keep their values
    let saved: Value =
        serde_json::from_str(&fs::read_to_string(data_dir.join("profile.json")).unwrap()).unwrap();
    assert_eq!(saved["weight"], 90.0);
    assert_eq!(saved["goal"], "lose_weight");
    assert_eq!(saved["name"], "Alex Fitness");

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("BMR: 1942 kcal"))
        .stdout(predicate::str::contains("Profile updated").not());
}

#[test]
fn test_profile_rejects_bad_measurements() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("profile")
        .arg("--weight")
        .arg("-5")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();

    cli()
        .arg("profile")
        .arg("--height=0")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("height must be positive"));

    assert!(!data_dir.join("profile.json").exists());
}

#[test]
fn test_protein_progress_reported() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("meal")
        .arg("--preset")
        .arg("chicken breast")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    // 31 g of the default 180 g target
    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("protein 31 / 180 g (17%)"));
}

#[test]
fn test_corrupted_profile_falls_back_to_default() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("profile.json"), "{ invalid json }}}").unwrap();

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Fitness"));
}

#[test]
fn test_history_lists_recent_workouts() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout history"));

    for routine in ["push_day", "pull_day"] {
        cli()
            .arg("train")
            .arg(routine)
            .arg("--auto-complete")
            .arg("--data-dir")
            .arg(data_dir)
            .assert()
            .success();
    }

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Push Power"))
        .stdout(predicate::str::contains("Back & Biceps"))
        .stdout(predicate::str::contains("2 workouts"));
}

#[test]
fn test_history_window_bounds() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("history")
        .arg("--days")
        .arg("0")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();

    cli()
        .arg("train")
        .arg("push_day")
        .arg("--auto-complete")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--days")
        .arg("100000000")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 workouts"));
}

#[test]
fn test_corrupted_journal_lines_ignored() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    fs::create_dir_all(data_dir.join("journal")).unwrap();
    fs::write(data_dir.join("journal/workouts.jsonl"), "{ invalid json }\n").unwrap();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout history"));
}

#[test]
fn test_rollup_with_cleanup() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to roll up"));

    cli()
        .arg("train")
        .arg("leg_day")
        .arg("--auto-complete")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--cleanup")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled up 1 workouts"))
        .stdout(predicate::str::contains("Cleaned up 1 processed journals"));

    let csv = fs::read_to_string(data_dir.join("workouts.csv")).unwrap();
    assert!(csv.starts_with("id,date,type,duration"));
    assert!(csv.contains("Leg Destruction"));

    // Archived workouts still show up in history
    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Leg Destruction"));
}
