#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn devkata(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("devkata").unwrap();
    cmd.env("DEVKATA_HOME", dir.path().join("devKata"));
    cmd
}

// ---------------------------------------------------------------------------
// CLI surface
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("devkata")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn reset_and_restore_are_mutually_exclusive() {
    let dir = TempDir::new().unwrap();
    devkata(&dir)
        .args(["stats", "--reset", "--restore"])
        .assert()
        .failure();
}

#[test]
fn home_flag_creates_the_data_directory() {
    let dir = TempDir::new().unwrap();
    let home = dir.path().join("elsewhere");
    Command::cargo_bin("devkata")
        .unwrap()
        .args(["--home", home.to_str().unwrap(), "stats"])
        .assert()
        .success();
    assert!(home.is_dir());
}

// ---------------------------------------------------------------------------
// devkata stats
// ---------------------------------------------------------------------------

#[test]
fn stats_without_history_says_so() {
    let dir = TempDir::new().unwrap();
    devkata(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("No kata history yet"));
}

#[test]
fn reset_without_data_is_non_interactive() {
    let dir = TempDir::new().unwrap();
    devkata(&dir)
        .args(["stats", "--reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to reset"));
}

#[test]
fn restore_without_backups_says_so() {
    let dir = TempDir::new().unwrap();
    devkata(&dir)
        .args(["stats", "--restore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No backups found"));
}
