use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_paths_command_runs_successfully() {
    let mut cmd = Command::cargo_bin("projdex").unwrap();

    cmd.arg("paths");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration paths:"))
        .stdout(predicate::str::contains("Projects directory:"))
        .stdout(predicate::str::contains("Output file:"));
}

#[test]
fn test_index_command_writes_a_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let projects_dir = temp_dir.path().join("projects");
    std::fs::create_dir_all(projects_dir.join("tool")).unwrap();
    std::fs::write(projects_dir.join("tool").join("Cargo.toml"), "[package]").unwrap();
    let output = temp_dir.path().join("index.html");

    let mut cmd = Command::cargo_bin("projdex").unwrap();
    cmd.env("PROJDEX_PROJECTS_DIR", &projects_dir)
        .arg("index")
        .arg("--output")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Indexed 1 project(s)"));
    assert!(output.exists());
}

#[test]
fn test_index_json_prints_records() {
    let temp_dir = tempfile::tempdir().unwrap();
    let projects_dir = temp_dir.path().join("projects");
    std::fs::create_dir_all(projects_dir.join("tool")).unwrap();
    std::fs::write(projects_dir.join("tool").join("go.mod"), "module tool").unwrap();

    let mut cmd = Command::cargo_bin("projdex").unwrap();
    cmd.env("PROJDEX_PROJECTS_DIR", &projects_dir)
        .arg("index")
        .arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Go\""));
}
