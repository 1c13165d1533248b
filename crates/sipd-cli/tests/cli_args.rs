use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_sipd_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("sipd")
}

#[test]
fn test_help_lists_the_flags() {
    let mut cmd = Command::new(get_sipd_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--dev"))
        .stdout(predicate::str::contains("--headless"))
        .stdout(predicate::str::contains("--chrome"))
        .stdout(predicate::str::contains("--session"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_help_names_the_portal() {
    let mut cmd = Command::new(get_sipd_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SIPD-RI"));
}

#[test]
fn test_session_flag_has_a_default() {
    let mut cmd = Command::new(get_sipd_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cookies.json"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::new(get_sipd_bin());
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sipd"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let mut cmd = Command::new(get_sipd_bin());
    cmd.arg("--frobnicate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
