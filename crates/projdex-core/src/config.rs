use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Directory whose immediate subdirectories are treated as projects.
    pub projects_dir: PathBuf,

    /// Where the HTML index is written.
    pub output_file: PathBuf,

    /// Projects younger than this many days are "Active".
    pub active_days: u64,

    /// Projects older than this many days are "Archived"; in between is
    /// "Maintenance".
    pub archive_days: u64,

    /// Directory names to skip during the scan, on top of the built-in set.
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::new(),
            output_file: PathBuf::from("project_index.html"),
            active_days: 90,
            archive_days: 365,
            exclude: vec![],
        }
    }
}

impl Settings {
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "projdex").ok_or(Error::HomeDirNotFound)?;
        Ok(dirs.config_dir().join("settings.toml"))
    }

    pub fn new() -> Result<Self> {
        let home_dir = std::env::var("HOME").map_err(|_| Error::HomeDirNotFound)?;
        let config_path = Self::config_path()?;

        let config_builder = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(config::Environment::with_prefix("PROJDEX"))
            .set_default("projects_dir", format!("{}/projects", home_dir))?
            .set_default("output_file", "project_index.html")?
            .set_default("active_days", 90)?
            .set_default("archive_days", 365)?
            .build()?;
        config_builder.try_deserialize().map_err(Error::Config)
    }
}
