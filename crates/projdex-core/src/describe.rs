use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::models::Probe;

/// Fixed placeholder returned whenever no usable summary can be extracted.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Markdown heading whose text is a known overview synonym, capturing the
/// block that follows it up to the next heading or paragraph break.
const HEADING_PATTERN: &str =
    r"(?si)#+\s*(?:project\s+overview|overview|about|description|introduction)\s*\n+(.+?)(?:\n#+|\n\n|$)";

/// A blank-line-delimited block that does not start with a heading marker
/// and is at least 30 characters past its first character.
const PARAGRAPH_PATTERN: &str = r"\n\n([^#\n][^\n]{30,})";

/// Extracts a human-written summary from a project's README.
///
/// The contract is total: [`DescriptionExtractor::describe`] always returns a
/// non-empty string and never fails, degrading to [`NO_DESCRIPTION`] when the
/// README is missing, unreadable, or yields no match.
#[derive(Debug)]
pub struct DescriptionExtractor {
    heading: Regex,
    paragraph: Regex,
}

impl DescriptionExtractor {
    pub fn new() -> Self {
        Self {
            heading: Regex::new(HEADING_PATTERN).expect("heading pattern is valid"),
            paragraph: Regex::new(PARAGRAPH_PATTERN).expect("paragraph pattern is valid"),
        }
    }

    pub fn describe(&self, dir: &Path) -> String {
        match self.probe(dir) {
            Probe::Found(description) => description,
            Probe::Absent | Probe::Failed => NO_DESCRIPTION.to_string(),
        }
    }

    /// Like [`describe`](Self::describe), but keeps "no README / no match"
    /// distinguishable from "the README could not be read".
    pub fn probe(&self, dir: &Path) -> Probe<String> {
        let Some(readme) = find_readme(dir) else {
            return Probe::Absent;
        };
        let bytes = match fs::read(&readme) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %readme.display(), error = %e, "Could not read README.");
                return Probe::Failed;
            }
        };
        // Undecodable bytes are replaced, never fatal.
        let text = String::from_utf8_lossy(&bytes);

        if let Some(captures) = self.heading.captures(&text) {
            let block = captures[1].trim();
            if !block.is_empty() {
                return Probe::Found(block.to_string());
            }
        }
        if let Some(captures) = self.paragraph.captures(&text) {
            let block = captures[1].trim();
            if !block.is_empty() {
                return Probe::Found(block.to_string());
            }
        }
        Probe::Absent
    }
}

impl Default for DescriptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the documentation file for a directory: any top-level file whose
/// name starts with "README", case-insensitive. Picks the lexicographically
/// first match so repeated scans agree.
pub fn find_readme(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|entry| {
            entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                && entry
                    .file_name()
                    .to_string_lossy()
                    .to_ascii_lowercase()
                    .starts_with("readme")
        })
        .map(|entry| entry.path())
        .collect();
    matches.sort();
    matches.into_iter().next()
}
