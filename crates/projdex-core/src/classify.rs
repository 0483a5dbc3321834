use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use git2::Repository;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::models::{Language, Probe, ProjectType, Status};

/// How a single classification rule recognizes its ecosystem.
#[derive(Debug, Clone, Copy)]
enum Marker {
    /// A file with this exact name at the top level of the project.
    RootFile(&'static str),
    /// At least one top-level file with this extension.
    RootExt(&'static str),
    /// A directory bundle with this extension anywhere in the tree.
    BundleAnywhere(&'static str),
    /// At least one file with this extension anywhere in the tree.
    SourceAnywhere(&'static str),
}

/// Ordered (marker, tag) rules. The first marker found wins and evaluation
/// stops, so rule order is the priority order. Several rules may map to the
/// same tag; that is how "manifest OR top-level source" disjunctions are
/// expressed without nesting.
const TYPE_RULES: &[(Marker, ProjectType)] = &[
    (Marker::RootFile("package.json"), ProjectType::Node),
    (Marker::RootFile("pom.xml"), ProjectType::Maven),
    (Marker::RootFile("build.gradle"), ProjectType::Gradle),
    (Marker::RootFile("build.gradle.kts"), ProjectType::Gradle),
    (Marker::RootFile("go.mod"), ProjectType::Go),
    (Marker::RootFile("Cargo.toml"), ProjectType::Rust),
    (Marker::RootFile("requirements.txt"), ProjectType::Python),
    (Marker::RootFile("pyproject.toml"), ProjectType::Python),
    (Marker::RootExt("py"), ProjectType::Python),
    (Marker::RootFile("Dockerfile"), ProjectType::Docker),
    (Marker::BundleAnywhere("xcodeproj"), ProjectType::SwiftXcode),
    (Marker::BundleAnywhere("xcworkspace"), ProjectType::SwiftXcode),
    (Marker::SourceAnywhere("swift"), ProjectType::SwiftSources),
];

/// Extension allow-list for language detection, sorted lexicographically by
/// extension. Ties between equal counts resolve to the first entry in this
/// table, i.e. to the lexicographically smallest extension.
pub const LANGUAGE_MAP: &[(&str, Language)] = &[
    ("css", Language::Css),
    ("erl", Language::Erlang),
    ("go", Language::Go),
    ("html", Language::Html),
    ("java", Language::Java),
    ("js", Language::JavaScript),
    ("kt", Language::Kotlin),
    ("py", Language::Python),
    ("rs", Language::Rust),
    ("scss", Language::Scss),
    ("sh", Language::Shell),
    ("sol", Language::Solidity),
    ("sql", Language::Sql),
    ("swift", Language::Swift),
    ("ts", Language::TypeScript),
];

#[derive(Debug)]
pub struct ProjectClassifier {
    active_days: i64,
    archive_days: i64,
}

impl ProjectClassifier {
    pub fn new(active_days: u64, archive_days: u64) -> Self {
        Self {
            active_days: active_days as i64,
            archive_days: archive_days as i64,
        }
    }

    /// Evaluates the marker rules in priority order and returns the tag of
    /// the first one that matches. Every probe is best-effort: an unreadable
    /// directory simply fails to match.
    pub fn detect_type(&self, path: &Path) -> ProjectType {
        for (marker, tag) in TYPE_RULES {
            if marker_matches(path, *marker) {
                return *tag;
            }
        }
        ProjectType::Unknown
    }

    /// Walks the whole tree once, counting files whose extension is in
    /// [`LANGUAGE_MAP`]. The strictly highest count wins; ties resolve by
    /// table order (lexicographic on extension). No recognized extension
    /// anywhere means [`Language::Unknown`].
    pub fn detect_language(&self, path: &Path) -> Language {
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if let Some((key, _)) = LANGUAGE_MAP.iter().find(|(known, _)| *known == ext) {
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        let mut winner = Language::Unknown;
        let mut best = 0usize;
        for (ext, language) in LANGUAGE_MAP {
            let count = counts.get(ext).copied().unwrap_or(0);
            if count > best {
                best = count;
                winner = *language;
            }
        }
        winner
    }

    /// Determines the last activity date of a project, trying git first and
    /// falling back to the directory's own mtime. Both probes degrade to
    /// [`Probe::Failed`] instead of erroring out of the classification.
    pub fn last_activity(&self, path: &Path) -> Probe<NaiveDate> {
        if path.join(".git").is_dir() {
            match git_last_commit_date(path) {
                Ok(date) => return Probe::Found(date),
                Err(e) => {
                    // Empty repos have no commits. Fall back to mtime.
                    debug!(path = %path.display(), error = %e, "Git activity check failed, falling back to mtime.");
                }
            }
        }
        match dir_mtime(path) {
            Ok(date) => Probe::Found(date),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Could not read directory mtime.");
                Probe::Failed
            }
        }
    }

    /// Maps an activity probe to the record fields: a found date gets the
    /// threshold status, a missing or failed probe degrades to no date and
    /// [`Status::Unknown`] (never Active-by-default).
    pub fn resolve_activity(
        &self,
        probe: Probe<NaiveDate>,
        today: NaiveDate,
    ) -> (Option<NaiveDate>, Status) {
        match probe.found() {
            Some(date) => (Some(date), self.status_for(date, today)),
            None => (None, Status::Unknown),
        }
    }

    /// Pure recency thresholding: age < active_days is Active, below
    /// archive_days is Maintenance, anything older is Archived.
    pub fn status_for(&self, last_modified: NaiveDate, today: NaiveDate) -> Status {
        let age_days = today.signed_duration_since(last_modified).num_days();
        if age_days < self.active_days {
            Status::Active
        } else if age_days < self.archive_days {
            Status::Maintenance
        } else {
            Status::Archived
        }
    }
}

fn marker_matches(path: &Path, marker: Marker) -> bool {
    match marker {
        Marker::RootFile(name) => path.join(name).is_file(),
        Marker::RootExt(ext) => {
            let Ok(entries) = fs::read_dir(path) else {
                return false;
            };
            entries.filter_map(|e| e.ok()).any(|entry| {
                entry.path().is_file() && has_extension(&entry.path(), ext)
            })
        }
        Marker::BundleAnywhere(ext) => WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .any(|entry| entry.file_type().is_dir() && has_extension(entry.path(), ext)),
        Marker::SourceAnywhere(ext) => WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .any(|entry| entry.file_type().is_file() && has_extension(entry.path(), ext)),
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

/// Date of the most recent commit across all local branches.
fn git_last_commit_date(path: &Path) -> Result<NaiveDate> {
    let repo = Repository::open(path)?;
    let last_commit = find_last_commit_across_branches(&repo)?;
    let seconds = last_commit.time().seconds();
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| Error::Custom("Invalid commit time".to_string()))
}

fn find_last_commit_across_branches(repo: &Repository) -> Result<git2::Commit<'_>> {
    repo.branches(Some(git2::BranchType::Local))?
        .filter_map(|res| res.ok())
        .filter_map(|(branch, _)| branch.get().peel_to_commit().ok())
        .max_by_key(|commit| commit.time().seconds())
        .ok_or_else(|| {
            Error::Git(git2::Error::new(
                git2::ErrorCode::UnbornBranch,
                git2::ErrorClass::Reference,
                "No commits found in any local branch",
            ))
        })
}

fn dir_mtime(path: &Path) -> Result<NaiveDate> {
    let metadata = fs::metadata(path)?;
    let modified: DateTime<Utc> = metadata.modified()?.into();
    Ok(modified.date_naive())
}
