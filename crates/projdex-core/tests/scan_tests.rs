use chrono::NaiveDate;
use projdex_core::describe::NO_DESCRIPTION;
use projdex_core::{Language, ProjectType, Scanner, Settings, Status};
use std::fs;
use tempfile::tempdir;

mod helpers;
use helpers::{init_git_repo_with_date, setup_tracing, write_files};

/// Builds a projects directory with a mix of project shapes and returns
/// settings pointing at it.
fn setup_scan_env() -> (tempfile::TempDir, Settings) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let projects_dir = temp_dir.path().join("projects");
    fs::create_dir_all(&projects_dir).unwrap();

    // A Node project with an old git history.
    let webapp = projects_dir.join("webapp");
    fs::create_dir(&webapp).unwrap();
    write_files(&webapp, &["package.json", "src/index.js", "src/app.js"]);
    fs::write(
        webapp.join("README.md"),
        "# webapp\n\n## Overview\n\nA small web application.\n\n## Usage\n",
    )
    .unwrap();
    init_git_repo_with_date(&webapp, "old commit", "2023-01-01T12:00:00Z");

    // A Python project with no git history; its mtime is fresh.
    let pytool = projects_dir.join("pytool");
    fs::create_dir(&pytool).unwrap();
    write_files(&pytool, &["requirements.txt", "main.py", "util.py"]);

    // A directory with nothing recognizable in it.
    let mystery = projects_dir.join("mystery");
    fs::create_dir(&mystery).unwrap();

    // Same name in two cases; both must survive the scan.
    write_files(&projects_dir.join("Alpha"), &["go.mod"]);
    write_files(&projects_dir.join("alpha"), &["Cargo.toml"]);

    // Entries the driver must skip.
    fs::create_dir(projects_dir.join(".hidden")).unwrap();
    fs::create_dir(projects_dir.join("node_modules")).unwrap();
    write_files(&projects_dir.join("ignored_proj"), &["package.json"]);
    fs::write(projects_dir.join("stray_file.txt"), "not a project").unwrap();

    let settings = Settings {
        projects_dir,
        output_file: temp_dir.path().join("index.html"),
        exclude: vec!["ignored_proj".to_string()],
        ..Default::default()
    };

    (temp_dir, settings)
}

#[test]
fn it_scans_all_projects_and_skips_excluded_entries() {
    setup_tracing();
    let (_temp_dir, settings) = setup_scan_env();
    let scanner = Scanner::new(settings);

    let records = scanner.scan_projects().unwrap();
    let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();

    assert_eq!(names, ["Alpha", "alpha", "mystery", "pytool", "webapp"]);
}

#[test]
fn git_backed_project_gets_commit_date_and_archived_status() {
    setup_tracing();
    let (_temp_dir, settings) = setup_scan_env();
    let scanner = Scanner::new(settings);

    let records = scanner.scan_projects().unwrap();
    let webapp = records.iter().find(|r| r.name == "webapp").unwrap();

    assert_eq!(webapp.project_type, ProjectType::Node);
    assert_eq!(webapp.language, Language::JavaScript);
    assert_eq!(
        webapp.last_modified,
        Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
    );
    assert_eq!(webapp.status, Status::Archived);
    assert_eq!(webapp.description, "A small web application.");
}

#[test]
fn fresh_non_git_project_is_active_via_mtime() {
    setup_tracing();
    let (_temp_dir, settings) = setup_scan_env();
    let scanner = Scanner::new(settings);

    let records = scanner.scan_projects().unwrap();
    let pytool = records.iter().find(|r| r.name == "pytool").unwrap();

    assert_eq!(pytool.project_type, ProjectType::Python);
    assert_eq!(pytool.language, Language::Python);
    assert_eq!(pytool.status, Status::Active);
    assert!(pytool.last_modified.is_some());
    assert_eq!(pytool.description, NO_DESCRIPTION);
}

#[test]
fn unrecognizable_project_degrades_to_unknown_fields() {
    setup_tracing();
    let (_temp_dir, settings) = setup_scan_env();
    let scanner = Scanner::new(settings);

    let records = scanner.scan_projects().unwrap();
    let mystery = records.iter().find(|r| r.name == "mystery").unwrap();

    assert_eq!(mystery.project_type, ProjectType::Unknown);
    assert_eq!(mystery.language, Language::Unknown);
    assert_eq!(mystery.description, NO_DESCRIPTION);
}

#[test]
fn write_report_produces_the_html_index() {
    setup_tracing();
    let (_temp_dir, settings) = setup_scan_env();
    let output_file = settings.output_file.clone();
    let scanner = Scanner::new(settings);

    let records = scanner.write_report().unwrap();
    assert_eq!(records.len(), 5);

    let html = fs::read_to_string(output_file).unwrap();
    assert!(html.contains("<h1>Code Projects Index</h1>"));
    assert!(html.contains("Contains information about 5 projects."));
    assert!(html.contains("<td>webapp</td>"));
    assert!(html.contains("<td>JavaScript/Node.js</td>"));
}
