// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! CLI integration tests for the skiroute binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TINY_RESORT: &str = r#"
name = "Tiny"
rows = [["Top"], ["Base"]]

[[slopes]]
from = "Top"
to = "Base"
km = 2.5
grade = "blue"
name = "Home Run"

[[lifts]]
from = "Base"
to = "Top"
minutes = 8.0
name = "Chair"
"#;

/// A command isolated from the user's configuration and environment
fn skiroute(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("skiroute").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RUST_LOG")
        .env_remove("SKIROUTE_CONFIG")
        .env_remove("SKIROUTE_RESORT")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

fn tiny_resort(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tiny.toml");
    fs::write(&path, TINY_RESORT).unwrap();
    path
}

#[test]
fn test_locations_lists_builtin_resort() {
    let home = TempDir::new().unwrap();

    skiroute(&home)
        .arg("locations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vallandry"))
        .stdout(predicate::str::contains("Grizzly Lift"));
}

#[test]
fn test_render_dot_to_stdout() {
    let home = TempDir::new().unwrap();

    skiroute(&home)
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph resort"))
        .stdout(predicate::str::contains("Les Arcs Ski Resort Graph"));
}

#[test]
fn test_render_dot_to_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("resort.dot");

    skiroute(&home)
        .args(["render", "--output"])
        .arg(&out)
        .assert()
        .success();

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.contains("rank=same"));
}

#[test]
fn test_plan_on_custom_resort() {
    let home = TempDir::new().unwrap();
    let resort = tiny_resort(&home);

    // Home Run takes 6 minutes at blue speed, so two descents fit in 30
    skiroute(&home)
        .arg("--resort")
        .arg(&resort)
        .args(["plan", "--start", "Top", "--budget", "30", "--target", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Max distance: 5.0 km"))
        .stdout(predicate::str::contains("Home Run → Chair → Home Run"))
        .stdout(predicate::str::contains("target not reached"));
}

#[test]
fn test_plan_unknown_start_prints_no_path() {
    let home = TempDir::new().unwrap();

    skiroute(&home)
        .args(["plan", "--start", "Nowhere", "--budget", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Max distance: 0.0 km"))
        .stdout(predicate::str::contains("No path found."));
}

#[test]
fn test_plan_json_output() {
    let home = TempDir::new().unwrap();
    let resort = tiny_resort(&home);

    let output = skiroute(&home)
        .arg("--resort")
        .arg(&resort)
        .args(["--json", "plan", "--start", "Top", "--budget", "30", "--target", "100"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["resort"], "Tiny");
    assert_eq!(report["outcome"]["distance_km"], 5.0);
    assert_eq!(report["outcome"]["path"].as_array().unwrap().len(), 3);
}

#[test]
fn test_plan_reads_config_file() {
    let home = TempDir::new().unwrap();
    let resort = tiny_resort(&home);
    let config = home.path().join("skiroute.toml");
    fs::write(
        &config,
        format!(
            "resort_file = {:?}\n\n[plan]\nstart = \"Top\"\ntime_budget_minutes = 10.0\ntarget_km = 100.0\n",
            resort.display().to_string()
        ),
    )
    .unwrap();

    skiroute(&home)
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max distance: 2.5 km"));
}

#[test]
fn test_bad_resort_file_fails() {
    let home = TempDir::new().unwrap();
    let resort = home.path().join("broken.toml");
    fs::write(&resort, "name = \"Broken\"\n[[slopes]]\nfrom = \"A\"\nto = \"B\"\nkm = 1.0\ngrade = \"green\"\nname = \"X\"\n")
        .unwrap();

    skiroute(&home)
        .arg("--resort")
        .arg(&resort)
        .arg("locations")
        .assert()
        .failure();
}

#[test]
fn test_config_shows_sections() {
    let home = TempDir::new().unwrap();

    skiroute(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[search]"))
        .stdout(predicate::str::contains("[plan]"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();

    skiroute(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skiroute"));
}
