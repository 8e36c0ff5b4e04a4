//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from any config in the real home or working directory.
fn cogscreen(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cogscreen").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("COGSCREEN_WORD_BANK")
        .env_remove("COGSCREEN_SEED")
        .env_remove("RUST_LOG");
    cmd
}

/// Lines that take a session from the title screen to the first Stroop
/// trial: default words, perfect recall and serial 7s, failed digit span,
/// fifteen animals.
fn lines_until_stroop() -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut push = |items: &[&str]| lines.extend(items.iter().map(|s| s.to_string()));

    push(&["", "", ""]);
    push(&["zzz"; 5]);
    push(&["", "", ""]);
    push(&["apple table penny garden finger"]);
    push(&["", ""]);
    push(&["93 86 79 72 65"]);
    push(&["", ""]);
    push(&["0", "0"]);
    push(&["", ""]);
    push(&[
        "cat", "dog", "horse", "cow", "pig", "sheep", "goat", "lion", "tiger", "bear", "wolf",
        "fox", "deer", "rabbit", "mouse",
    ]);
    push(&["done"]);
    push(&["", ""]);

    lines
}

/// Stdin for a full session, answering every Stroop trial "red".
fn full_session_input() -> String {
    let mut lines = lines_until_stroop();
    let mut push = |items: &[&str]| lines.extend(items.iter().map(|s| s.to_string()));

    push(&["red"; 10]);
    push(&["", ""]);
    push(&["finger, garden, penny, table, apple"]);
    push(&[""]);
    push(&["q"]);

    lines.join("\n") + "\n"
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-administered cognitive screening"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cogscreen"));
}

#[test]
fn score_perfect() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .args([
            "score",
            "--orientation",
            "5",
            "--immediate-recall",
            "5",
            "--serial7s",
            "5",
            "--digit-forward",
            "2",
            "--digit-backward",
            "2",
            "--fluency",
            "3",
            "--stroop",
            "5",
            "--delayed-recall",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("30/30"))
        .stdout(predicate::str::contains("Normal Cognition"))
        .stdout(predicate::str::contains("Category Fluency"));
}

#[test]
fn score_defaults_to_zero() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/30"))
        .stdout(predicate::str::contains("Severe Cognitive Impairment"));
}

#[test]
fn score_json() {
    let dir = TempDir::new().unwrap();
    let output = cogscreen(&dir)
        .args(["score", "--orientation", "5", "--serial7s", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["raw"], 8);
    assert_eq!(value["normalized"], 8);
    assert_eq!(value["category"], "severe_impairment");
}

#[test]
fn score_out_of_range() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .args(["score", "--fluency", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("exceeds maximum 3"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    cogscreen(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created cogscreen.toml"))
        .stdout(predicate::str::contains("Created words.txt"));

    assert!(dir.path().join("cogscreen.toml").exists());
    assert!(dir.path().join("words.txt").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    cogscreen(&dir).arg("init").assert().success();

    cogscreen(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_after_init() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir).arg("init").assert().success();

    cogscreen(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Word bank: words.txt"))
        .stdout(predicate::str::contains("Configuration valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(dir.path().join("tiny.txt"), "cat\ndog\n").unwrap();
    std::fs::write(
        &config,
        "word_bank = \"tiny.txt\"\n\n[timing]\nfluency_secs = 0\n",
    )
    .unwrap();

    cogscreen(&dir)
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("fluency_secs is 0"))
        .stdout(predicate::str::contains("has 2 words"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_nonexistent_config() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("validate")
        .arg("--config")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn run_full_session() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("run")
        .write_stdin(full_session_input())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cognitive Assessment Tool"))
        .stdout(predicate::str::contains("What season is it?"))
        .stdout(predicate::str::contains("Orientation: 0/5"))
        .stdout(predicate::str::contains("Immediate Recall: 5/5"))
        .stdout(predicate::str::contains("Serial 7s: 5/5"))
        .stdout(predicate::str::contains("Digit Span: 0/4"))
        .stdout(predicate::str::contains("Category Fluency: 3/3"))
        .stdout(predicate::str::contains("Delayed Recall: 5/5"))
        .stdout(predicate::str::contains("Total score:"))
        .stdout(predicate::str::contains("Raw total"));
}

#[test]
fn run_writes_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("out").join("session.json");

    cogscreen(&dir)
        .args(["run", "--seed", "7", "--report"])
        .arg(&report)
        .write_stdin(full_session_input())
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let content = std::fs::read_to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["scores"]["immediate_recall"], 5);
    assert_eq!(value["scores"]["serial7s"], 5);
    assert_eq!(value["scores"]["fluency"], 3);
    assert_eq!(value["animals"].as_array().unwrap().len(), 15);
    assert!(value["result"]["normalized"].is_u64());
    assert!(value["completed_at"].is_string());
}

#[test]
fn run_with_missing_word_bank_falls_back() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .args(["run", "--word-bank", "no-such-words.txt"])
        .write_stdin(full_session_input())
        .assert()
        .success()
        .stderr(predicate::str::contains("default words"))
        .stdout(predicate::str::contains("Immediate Recall: 5/5"));
}

#[test]
fn run_eof_before_completion() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .args(["run", "--json"])
        .write_stdin("\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ended before completion."))
        .stdout(predicate::str::contains("\"result\": null"));
}

#[test]
fn run_ignores_blank_stroop_lines() {
    let dir = TempDir::new().unwrap();
    let mut lines = lines_until_stroop();
    lines.extend(["", "", ""].map(String::from));

    cogscreen(&dir)
        .arg("run")
        .write_stdin(lines.join("\n") + "\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trial 1 of 10"))
        .stdout(predicate::str::contains("Trial 2 of 10").not());
}

#[test]
fn rust_log_enables_core_debug_output() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .env("RUST_LOG", "cogscreen_core=debug")
        .arg("run")
        .write_stdin("\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("stage transition"));
}

#[test]
fn default_log_level_hides_debug_output() {
    let dir = TempDir::new().unwrap();
    cogscreen(&dir)
        .arg("run")
        .write_stdin("\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("stage transition").not());
}
