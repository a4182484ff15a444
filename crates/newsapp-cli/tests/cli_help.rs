use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("newsapp")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("options"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_register_help_shows_form_flags() {
    cargo_bin_cmd!("newsapp")
        .args(["register", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--full-name"))
        .stdout(predicate::str::contains("--category"))
        .stdout(predicate::str::contains("--custom-preference"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("newsapp")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set-api-url"));
}

#[test]
fn test_unknown_category_is_rejected() {
    cargo_bin_cmd!("newsapp")
        .args(["register", "--category", "gossip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'gossip'"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("newsapp")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}
