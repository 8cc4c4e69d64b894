//! Integration tests for the `info` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::fixture;

#[test]
fn info_prints_trial_summary() {
    let mut cmd = Command::cargo_bin("gaitview").unwrap();
    cmd.arg("info").arg(fixture("sample_trial.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("name:            sample trial"))
        .stdout(predicate::str::contains("frames:          5"))
        .stdout(predicate::str::contains("steps per cycle: 4"))
        .stdout(predicate::str::contains("left_pes"));
}

#[test]
fn info_rejects_frame_count_mismatch() {
    let mut cmd = Command::cargo_bin("gaitview").unwrap();
    cmd.arg("info").arg(fixture("frame_count_mismatch.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("frame count"));
}

#[test]
fn info_rejects_missing_file() {
    let mut cmd = Command::cargo_bin("gaitview").unwrap();
    cmd.arg("info").arg("/nonexistent/trial.json");

    cmd.assert().failure();
}

#[test]
fn info_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let mut cmd = Command::cargo_bin("gaitview").unwrap();
    cmd.arg("info").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}
