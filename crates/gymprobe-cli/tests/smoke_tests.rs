//! Smoke tests for the gymprobe CLI
//!
//! Everything here runs without Chromium: `run` always uses `--mock`.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A gymprobe command isolated from the caller's config and environment
fn gymprobe(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gymprobe").expect("gymprobe binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("GYMPROBE_BASE_URL")
        .env_remove("GYMPROBE_HEADLESS")
        .env_remove("GYMPROBE_RETRIES")
        .env_remove("RUST_LOG");
    cmd
}

fn temp() -> TempDir {
    TempDir::new().expect("create temp dir")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = temp();
    gymprobe(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let dir = temp();
    gymprobe(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workouts"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    let dir = temp();
    gymprobe(&dir).assert().failure();
}

#[test]
fn test_run_help_lists_flags() {
    let dir = temp();
    gymprobe(&dir)
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--headed"))
        .stdout(predicate::str::contains("--mock"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_prints_catalogue_in_order() {
    let dir = temp();
    let output = gymprobe(&dir).args(["list", "-q"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout.lines().collect();
    assert_eq!(ids.len(), 25);
    assert_eq!(ids[0], "login::admin reaches dashboard");
    let exercise = ids.iter().position(|id| *id == "admin::create exercise");
    let template = ids.iter().position(|id| *id == "admin::create template");
    assert!(exercise.is_some() && exercise < template);
}

#[test]
fn test_list_filter() {
    let dir = temp();
    gymprobe(&dir)
        .args(["list", "--filter", "register"])
        .assert()
        .success()
        .stdout(predicate::str::contains("register::duplicate email"))
        .stdout(predicate::str::contains("login::").not());
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_prints_defaults() {
    let dir = temp();
    gymprobe(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: http://localhost:5173"))
        .stdout(predicate::str::contains("headless: true"));
}

#[test]
fn test_config_reads_working_dir_file() {
    let dir = temp();
    fs::write(
        dir.path().join("gymprobe.yaml"),
        "base_url: http://127.0.0.1:4173\nretries: 0\n",
    )
    .unwrap();

    gymprobe(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: http://127.0.0.1:4173"))
        .stdout(predicate::str::contains("retries: 0"));
}

#[test]
fn test_config_env_overrides_file() {
    let dir = temp();
    let path = dir.path().join("suite.yaml");
    fs::write(&path, "base_url: http://127.0.0.1:4173\n").unwrap();

    gymprobe(&dir)
        .args(["config", "--config"])
        .arg(&path)
        .env("GYMPROBE_BASE_URL", "http://staging.local:8080")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url: http://staging.local:8080"));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = temp();
    fs::write(dir.path().join("gymprobe.yaml"), "browser_speed: fast\n").unwrap();

    gymprobe(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// run --mock
// ============================================================================

#[test]
fn test_run_mock_filtered_passes() {
    let dir = temp();
    gymprobe(&dir)
        .args(["run", "--mock", "--color", "never", "--filter", "protected-routes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("PASSED 4 scenarios"));
}

#[test]
fn test_run_mock_json_report() {
    let dir = temp();
    let output = gymprobe(&dir)
        .args(["run", "--mock", "-q", "--format", "json", "--filter", "login::"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["suite_name"], "workouts-e2e");
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn test_run_full_catalogue_on_mock() {
    let dir = temp();
    gymprobe(&dir)
        .args(["run", "--mock", "-q"])
        .assert()
        .success();
}

#[test]
fn test_run_invalid_base_url_fails() {
    let dir = temp();
    gymprobe(&dir)
        .args(["run", "--mock", "--base-url", "localhost:5173"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_run_template_alone_fails_on_fresh_app() {
    let dir = temp();
    gymprobe(&dir)
        .args([
            "run",
            "--mock",
            "--color",
            "never",
            "--retries",
            "0",
            "--filter",
            "create template",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 scenarios failed"));
}
