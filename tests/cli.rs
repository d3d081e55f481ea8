// ABOUTME: Integration tests for the nephos CLI commands.
// ABOUTME: Validates --help output, init behavior, and credential failure.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn nephos_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("nephos"))
}

#[test]
fn help_shows_commands() {
    nephos_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("nephos.yml");

    nephos_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "nephos.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(
        content.contains("template:"),
        "Config should have template field"
    );
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("nephos.yml");

    fs::write(&config_path, "existing: config").unwrap();

    nephos_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("nephos.yml");

    fs::write(&config_path, "existing: config").unwrap();

    nephos_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force", "--region", "westus2"])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("westus2"));
}

#[test]
fn deploy_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    nephos_cmd()
        .current_dir(temp_dir.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn deploy_without_credentials_fails_before_any_provider_call() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("nephos.yml"),
        "template: https://example/t.json\n",
    )
    .unwrap();

    nephos_cmd()
        .current_dir(temp_dir.path())
        .env_remove("TENANT_ID")
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("SUBSCRIPTION_ID")
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required environment variable",
        ));
}
