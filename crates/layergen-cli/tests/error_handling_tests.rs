//! Tests for error handling and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn layergen() -> Command {
    Command::cargo_bin("layergen").unwrap()
}

#[test]
fn validation_failure_suggests_a_rerun() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(
        &config,
        r#"
[domain]
name = "Shop"

[[entities]]
name = "User"

[[entities.fields]]
name = "email"
type = "varchar(255)"
"#,
    )
    .unwrap();

    layergen()
        .args(["validate", config.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("layergen validate"));
}

#[test]
fn missing_config_names_the_path() {
    layergen()
        .args(["validate", "/nonexistent/shop.toml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("/nonexistent/shop.toml"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    layergen()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage").or(predicate::str::contains("unrecognized")));
}

#[test]
fn unparseable_toml_is_reported_as_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    fs::write(&config, "[domain\nname = ").unwrap();

    // The broken file is the domain config, not the app config: it must
    // reach the loader and come back through the structured error path
    // with suggestions, not die during app-config loading.
    layergen()
        .args(["validate", config.to_str().unwrap()])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn non_verbose_errors_hint_at_verbose() {
    layergen()
        .args(["validate", "/nonexistent/shop.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--verbose"));
}
