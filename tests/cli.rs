//! End-to-end CLI checks
//!
//! Everything here runs offline: selector and configuration errors are
//! caught before any transport call, and the config commands only touch
//! temp files.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn gitpm() -> Command {
    let mut cmd = Command::cargo_bin("gitpm").unwrap();
    cmd.env_remove("GITPM_CONFIG").env_remove("GITPM_ST_BUILD");
    cmd
}

#[test]
fn help_lists_subcommands() {
    gitpm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("add"));
}

#[test]
fn resolve_rejects_malformed_selector() {
    gitpm()
        .args(["resolve", "a/b", "--refs", "notes/x", "--build", "4200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

#[test]
fn resolve_requires_a_build_number() {
    gitpm()
        .args(["resolve", "a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--build"));
}

#[test]
fn resolve_rejects_bad_urls() {
    gitpm()
        .args(["resolve", "not-a-url", "--build", "4200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doesn't look like a URL"));
}

#[test]
fn add_updates_and_removes_config_entries() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("packages.toml");
    let config_arg = config.to_str().unwrap();

    gitpm()
        .args(["--config", config_arg, "add", "wbond/package-name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));
    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("wbond/package-name"));

    // Adding the same repository again replaces the entry in place
    gitpm()
        .args([
            "--config",
            config_arg,
            "add",
            "wbond/package-name",
            "--refs",
            "heads/master",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));
    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("heads/master"));

    gitpm()
        .args(["--config", config_arg, "remove", "package-name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    let content = fs::read_to_string(&config).unwrap();
    assert!(!content.contains("wbond/package-name"));

    gitpm()
        .args(["--config", config_arg, "remove", "package-name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no package named"));
}

#[test]
fn add_rejects_a_bad_selector() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("packages.toml");

    gitpm()
        .args([
            "--config",
            config.to_str().unwrap(),
            "add",
            "a/b",
            "--refs",
            "pull/not-a-number",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
    assert!(!config.exists());
}

#[test]
fn check_with_no_packages_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("packages.toml");

    gitpm()
        .args([
            "--config",
            config.to_str().unwrap(),
            "check",
            "--build",
            "4200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages configured"));
}

#[test]
fn config_path_can_come_from_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("packages.toml");

    gitpm()
        .env("GITPM_CONFIG", config.to_str().unwrap())
        .args(["add", "kaste/plugin"])
        .assert()
        .success();
    assert!(config.exists());
}

#[test]
fn duplicate_config_entries_abort_processing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("packages.toml");
    fs::write(&config, "packages = [\"a/plugin\", \"b/plugin\"]\n").unwrap();

    gitpm()
        .args([
            "--config",
            config.to_str().unwrap(),
            "check",
            "--build",
            "4200",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate repository base name"));
}
