pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod describe;
pub mod error;
pub mod models;
pub mod report;

// Publicly re-export the main types for a clean external API.
pub use bootstrap::BootstrapAction;
pub use classify::ProjectClassifier;
pub use config::Settings;
pub use describe::DescriptionExtractor;
pub use error::{Error, Result};
pub use models::{Language, Probe, ProjectRecord, ProjectType, Status};

use chrono::Local;
use std::path::Path;
use tracing::{debug, info, instrument, span, Level};
use walkdir::WalkDir;

/// Directory names that never count as projects, on top of anything
/// dot-prefixed and the user-configured exclusion list.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "venv",
    ".venv",
    "dist",
    "build",
    "__pycache__",
    ".idea",
    ".vscode",
];

#[derive(Debug)]
pub struct Scanner {
    settings: Settings,
    classifier: ProjectClassifier,
    extractor: DescriptionExtractor,
}

impl Scanner {
    pub fn new(settings: Settings) -> Self {
        let classifier = ProjectClassifier::new(settings.active_days, settings.archive_days);
        Self {
            settings,
            classifier,
            extractor: DescriptionExtractor::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Enumerates the immediate subdirectories of the projects directory and
    /// classifies each one fully before moving on to the next. One malformed
    /// project never aborts the scan; its record just carries Unknown fields.
    #[instrument(skip(self), name = "scan_projects")]
    pub fn scan_projects(&self) -> Result<Vec<ProjectRecord>> {
        let mut records = Vec::new();
        let today = Local::now().date_naive();
        debug!(directory = %self.settings.projects_dir.display(), "Scanning for projects.");

        for entry_result in WalkDir::new(&self.settings.projects_dir)
            .min_depth(1)
            .max_depth(1)
        {
            let entry = entry_result?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || DEFAULT_EXCLUDED_DIRS.contains(&name.as_str()) {
                debug!(%name, "Skipping excluded directory.");
                continue;
            }
            if self.settings.exclude.iter().any(|excluded| *excluded == name) {
                debug!(%name, "Skipping excluded project.");
                continue;
            }

            records.push(self.scan_one(&name, entry.path(), today));
        }

        info!(project_count = records.len(), "Scan complete.");
        Ok(records)
    }

    /// Builds the record for one project. Every probe is best-effort, so
    /// this is infallible by construction.
    fn scan_one(&self, name: &str, path: &Path, today: chrono::NaiveDate) -> ProjectRecord {
        let project_span = span!(Level::INFO, "analyze_project", project_name = %name);
        let _enter = project_span.enter();
        info!("Analyzing project...");

        let project_type = self.classifier.detect_type(path);
        let language = self.classifier.detect_language(path);

        let (last_modified, status) = self
            .classifier
            .resolve_activity(self.classifier.last_activity(path), today);

        let description = self.extractor.describe(path);

        debug!(%project_type, %language, %status, "Classification done.");
        ProjectRecord {
            name: name.to_string(),
            path: path.to_path_buf(),
            project_type,
            language,
            status,
            last_modified,
            description,
        }
    }

    /// Scans and writes the HTML index in one step.
    pub fn write_report(&self) -> Result<Vec<ProjectRecord>> {
        let records = self.scan_projects()?;
        report::write_report(&records, &self.settings.output_file)?;
        Ok(records)
    }

    /// Provisions missing metadata for a single project under the projects
    /// directory. See [`bootstrap::bootstrap_project`].
    pub fn bootstrap_project(
        &self,
        name: &str,
        create_remote: bool,
    ) -> Result<Vec<BootstrapAction>> {
        let path = self.settings.projects_dir.join(name);
        bootstrap::bootstrap_project(&self.classifier, &path, name, create_remote)
    }
}
