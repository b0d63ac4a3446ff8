//! Integration tests for the `wl` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wl() -> Command {
    let mut cmd = Command::cargo_bin("wl").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// A temp directory holding a small flat dataset.
fn flat_dataset() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pairs.json"),
        r#"{"spectrum_pairs": [["Hot", "Cold"], ["Soft", "Hard"]]}"#,
    )
    .unwrap();
    dir
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_starter_dataset() {
    let dir = TempDir::new().unwrap();
    wl().args(["init", "mine.json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created dataset mine.json"));

    let text = fs::read_to_string(dir.path().join("mine.json")).unwrap();
    assert!(text.contains("\"categories\""));

    wl().args(["categories", "--dataset", "mine.json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Senses").and(predicate::str::contains("Everyday")));
}

#[test]
fn init_fails_if_file_exists() {
    let dir = flat_dataset();
    wl().args(["init", "pairs.json"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// categories
// ---------------------------------------------------------------------------

#[test]
fn categories_lists_builtin() {
    wl().arg("categories").assert().success().stdout(
        predicate::str::contains("Senses")
            .and(predicate::str::contains("All"))
            .and(predicate::str::contains("spectrum pairs")),
    );
}

#[test]
fn categories_rejects_bad_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"categories": {"A": [["only one"]]}}"#).unwrap();

    wl().args(["categories", "-d", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed pair #0"));
}

#[test]
fn categories_missing_dataset() {
    wl().args(["categories", "-d", "/no/such/file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read dataset"));
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

#[test]
fn score_bullseye() {
    wl().args(["score", "83", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bullseye").and(predicate::str::contains("5 points")));
}

#[test]
fn score_on_zone_edges() {
    for (guess, target, tier) in [("55", "50", "Bullseye"), ("17", "2", "Close"), ("45", "20", "Near")] {
        wl().args(["score", guess, target])
            .assert()
            .success()
            .stdout(predicate::str::contains(tier));
    }
}

#[test]
fn score_miss() {
    wl().args(["score", "40", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Miss").and(predicate::str::contains("30.0% off")));
}

#[test]
fn score_out_of_range() {
    wl().args(["score", "120", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_full_game() {
    wl().args(["play", "--category", "Senses"])
        .write_stdin(
            "clue 80 desert\nguess 83\nnext\nclue 50 middling\nguess 50\nnext\nquit\n",
        )
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Player 1 is the psychic")
                .and(predicate::str::contains("+5 Bullseye!"))
                .and(predicate::str::contains("3.0% off"))
                .and(predicate::str::contains("Player 2 is the psychic"))
                .and(predicate::str::contains("Game over!"))
                .and(predicate::str::contains("Tie between Player 1, Player 2")),
        );
}

#[test]
fn play_reports_ignored_input() {
    wl().args(["play", "--category", "Senses"])
        .write_stdin("next\nclue 50\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("only during reveal")
                .and(predicate::str::contains("the clue must not be empty")),
        );
}

#[test]
fn play_flat_dataset_skips_category_menu() {
    let dir = flat_dataset();
    wl().args(["play", "-d", "pairs.json", "--players", "3"])
        .current_dir(dir.path())
        .write_stdin("status\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Category: All")
                .and(predicate::str::contains("Round 1/3")),
        );
}

#[test]
fn play_shows_menu_without_category() {
    wl().arg("play")
        .write_stdin("category 1\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Categories:")
                .and(predicate::str::contains("Category: Senses")),
        );
}

#[test]
fn play_unknown_category_fails() {
    wl().args(["play", "--category", "Weather"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category: Weather"));
}

#[test]
fn play_needs_two_players() {
    wl().args(["play", "--players", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));
}

#[test]
fn play_logs_to_stderr() {
    let dir = flat_dataset();
    wl().args(["play", "-d", "pairs.json"])
        .current_dir(dir.path())
        .env("RUST_LOG", "wl_core=info")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded spectrum catalog"))
        .stdout(predicate::str::contains("loaded spectrum catalog").not());
}
