use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Everything the scanner learned about one project directory.
/// Built once per scan pass and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub language: Language,
    pub status: Status,
    pub last_modified: Option<NaiveDate>,
    pub description: String,
}

/// Ecosystem signature of a project, decided by first-match priority over
/// the marker rules in [`crate::classify`]. Exactly one per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Node,
    Maven,
    Gradle,
    Go,
    Rust,
    Python,
    Docker,
    /// An Xcode project or workspace bundle was found somewhere in the tree.
    SwiftXcode,
    /// Swift sources exist but no Xcode bundle does.
    SwiftSources,
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Node => "JavaScript/Node.js",
            ProjectType::Maven => "Java (Maven)",
            ProjectType::Gradle => "Java/Kotlin (Gradle)",
            ProjectType::Go => "Go",
            ProjectType::Rust => "Rust",
            ProjectType::Python => "Python",
            ProjectType::Docker => "Docker",
            ProjectType::SwiftXcode => "iOS/macOS (Swift)",
            ProjectType::SwiftSources => "iOS/macOS (Swift, no Xcode project)",
            ProjectType::Unknown => "Unknown",
        }
    }
}

/// Primary language of a project, derived from file-extension counts over
/// the allow-list in [`crate::classify::LANGUAGE_MAP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Kotlin,
    Go,
    Rust,
    Html,
    Css,
    Shell,
    Erlang,
    Sql,
    Solidity,
    Scss,
    Swift,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Shell => "Shell",
            Language::Erlang => "Erlang",
            Language::Sql => "SQL",
            Language::Solidity => "Solidity",
            Language::Scss => "SCSS",
            Language::Swift => "Swift",
            Language::Unknown => "Unknown",
        }
    }
}

/// Coarse recency classification derived from days since last activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Maintenance,
    Archived,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Maintenance => "Maintenance",
            Status::Archived => "Archived",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialize as the human-readable tag so the JSON output matches the report.
impl Serialize for ProjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of a single best-effort probe. Distinguishes a signal that was
/// genuinely missing from one the probe could not obtain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Found(T),
    Absent,
    Failed,
}

impl<T> Probe<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Probe::Found(value) => Some(value),
            Probe::Absent | Probe::Failed => None,
        }
    }
}
