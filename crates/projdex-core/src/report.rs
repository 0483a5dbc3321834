use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::ProjectRecord;

/// Renders the project index as a standalone HTML document: one table with
/// alternating blue/white rows, sorted case-insensitively by project name.
pub fn render(records: &[ProjectRecord]) -> String {
    let mut sorted: Vec<&ProjectRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.name.to_lowercase());

    let today = Local::now().format("%Y-%m-%d");
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>Code Projects Index</title>\n");
    html.push_str("    <style>\n");
    html.push_str("        body { font-family: Arial, sans-serif; margin: 20px; }\n");
    html.push_str("        table { border-collapse: collapse; width: 100%; }\n");
    html.push_str("        th { background-color: #4a86e8; color: white; font-weight: bold; text-align: left; padding: 8px; border: 1px solid #ddd; }\n");
    html.push_str("        tr:nth-child(even) { background-color: #e6f0ff; }\n");
    html.push_str("        tr:nth-child(odd) { background-color: white; }\n");
    html.push_str("        td { padding: 8px; border: 1px solid #ddd; vertical-align: top; }\n");
    html.push_str("        td.description { word-wrap: break-word; max-width: 500px; }\n");
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str("    <h1>Code Projects Index</h1>\n");
    let _ = writeln!(
        html,
        "    <p>Contains information about {} projects.</p>",
        sorted.len()
    );

    html.push_str("    <table>\n        <tr>\n");
    for column in [
        "Project Name",
        "Type",
        "Language",
        "Status",
        "Last Updated",
        "Location",
        "Description",
    ] {
        let _ = writeln!(html, "            <th>{}</th>", column);
    }
    html.push_str("        </tr>\n");

    for record in sorted {
        let last_modified = record
            .last_modified
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        // Descriptions are free text from READMEs; escape them and keep
        // their line breaks.
        let description = escape(&record.description).replace('\n', "<br>");

        html.push_str("        <tr>\n");
        let _ = writeln!(html, "            <td>{}</td>", escape(&record.name));
        let _ = writeln!(html, "            <td>{}</td>", record.project_type);
        let _ = writeln!(html, "            <td>{}</td>", record.language);
        let _ = writeln!(html, "            <td>{}</td>", record.status);
        let _ = writeln!(html, "            <td>{}</td>", last_modified);
        let _ = writeln!(
            html,
            "            <td>{}</td>",
            escape(&record.path.display().to_string())
        );
        let _ = writeln!(
            html,
            "            <td class=\"description\">{}</td>",
            description
        );
        html.push_str("        </tr>\n");
    }

    html.push_str("    </table>\n");
    let _ = writeln!(html, "    <p><em>Last updated: {}</em><br>", today);
    html.push_str("    <em>Generated by projdex</em></p>\n</body>\n</html>");
    html
}

pub fn write_report(records: &[ProjectRecord], output: &Path) -> Result<()> {
    debug!(path = %output.display(), "Writing HTML report.");
    fs::write(output, render(records))?;
    info!(path = %output.display(), count = records.len(), "Report written.");
    Ok(())
}

/// Pretty JSON rendition of the records, for machine consumption.
pub fn render_json(records: &[ProjectRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
