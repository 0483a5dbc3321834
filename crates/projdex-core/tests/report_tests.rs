use chrono::NaiveDate;
use projdex_core::models::ProjectRecord;
use projdex_core::{report, Language, ProjectType, Status};
use std::path::PathBuf;

fn record(name: &str) -> ProjectRecord {
    ProjectRecord {
        name: name.to_string(),
        path: PathBuf::from(format!("/projects/{}", name)),
        project_type: ProjectType::Rust,
        language: Language::Rust,
        status: Status::Active,
        last_modified: Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()),
        description: "A sample project.".to_string(),
    }
}

#[test]
fn rows_are_sorted_case_insensitively_by_name() {
    let records = vec![record("beta"), record("Alpha"), record("alpha")];
    let html = report::render(&records);

    let beta = html.find("<td>beta</td>").unwrap();
    let upper_alpha = html.find("<td>Alpha</td>").unwrap();
    let lower_alpha = html.find("<td>alpha</td>").unwrap();

    // Both "Alpha" and "alpha" appear, adjacent, ahead of "beta".
    assert!(upper_alpha < beta);
    assert!(lower_alpha < beta);
}

#[test]
fn html_special_characters_are_escaped() {
    let mut evil = record("evil");
    evil.description = "<script>alert('x') & more</script>\nsecond line".to_string();
    let html = report::render(&[evil]);

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert('x') &amp; more&lt;/script&gt;<br>second line"));
}

#[test]
fn missing_date_renders_as_unknown() {
    let mut nodate = record("nodate");
    nodate.last_modified = None;
    nodate.status = Status::Unknown;
    let html = report::render(&[nodate]);

    assert!(html.contains("<td>Unknown</td>"));
    assert!(html.contains("Contains information about 1 projects."));
}

#[test]
fn json_rendition_uses_the_display_tags() {
    let json = report::render_json(&[record("sample")]).unwrap();

    assert!(json.contains("\"name\": \"sample\""));
    assert!(json.contains("\"type\": \"Rust\""));
    assert!(json.contains("\"language\": \"Rust\""));
    assert!(json.contains("\"status\": \"Active\""));
    assert!(json.contains("\"last_modified\": \"2025-03-10\""));
}
