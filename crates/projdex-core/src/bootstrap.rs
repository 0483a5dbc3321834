use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use crate::classify::ProjectClassifier;
use crate::describe::find_readme;
use crate::error::{Error, Result};
use crate::models::ProjectType;

/// One provisioning step that was actually performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapAction {
    WroteReadme,
    WroteIgnoreFile,
    InitializedRepo,
    CreatedRemote,
}

const NODE_IGNORE: &str = "node_modules/\ndist/\n.env\n*.log\n";
const JVM_IGNORE: &str = "target/\nbuild/\n*.class\n.gradle/\n.idea/\n";
const GO_IGNORE: &str = "bin/\n*.test\n*.out\nvendor/\n";
const RUST_IGNORE: &str = "target/\n";
const PYTHON_IGNORE: &str = "__pycache__/\n*.pyc\n.venv/\nvenv/\ndist/\n*.egg-info/\n";
const DOCKER_IGNORE: &str = "*.log\n.env\n";
const SWIFT_IGNORE: &str = "DerivedData/\nbuild/\n*.xcuserstate\n";
const DEFAULT_IGNORE: &str = "*.log\n.DS_Store\n";

/// Static mapping from project type to ignore-file body. Read-only, decided
/// at compile time.
pub fn ignore_template(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::Node => NODE_IGNORE,
        ProjectType::Maven | ProjectType::Gradle => JVM_IGNORE,
        ProjectType::Go => GO_IGNORE,
        ProjectType::Rust => RUST_IGNORE,
        ProjectType::Python => PYTHON_IGNORE,
        ProjectType::Docker => DOCKER_IGNORE,
        ProjectType::SwiftXcode | ProjectType::SwiftSources => SWIFT_IGNORE,
        ProjectType::Unknown => DEFAULT_IGNORE,
    }
}

/// Fills in missing project metadata for a single project directory:
/// a stub README, an ignore file matching the detected type, a git
/// repository with an initial commit, and optionally a remote via the
/// `gh` CLI. Each step is skipped when its artifact already exists, so
/// running twice is harmless. A failing `gh` degrades to a warning.
#[instrument(skip(classifier), fields(project = %name))]
pub fn bootstrap_project(
    classifier: &ProjectClassifier,
    path: &Path,
    name: &str,
    create_remote: bool,
) -> Result<Vec<BootstrapAction>> {
    if !path.is_dir() {
        return Err(Error::Custom(format!(
            "'{}' is not a directory",
            path.display()
        )));
    }

    let mut actions = Vec::new();

    if find_readme(path).is_none() {
        let readme = format!("# {}\n\n## Overview\n\nDescribe this project here.\n", name);
        fs::write(path.join("README.md"), readme)?;
        info!("Wrote stub README.md");
        actions.push(BootstrapAction::WroteReadme);
    }

    if !path.join(".gitignore").exists() {
        let project_type = classifier.detect_type(path);
        fs::write(path.join(".gitignore"), ignore_template(project_type))?;
        info!(%project_type, "Wrote .gitignore from template");
        actions.push(BootstrapAction::WroteIgnoreFile);
    }

    if !path.join(".git").is_dir() {
        init_repo_with_commit(path)?;
        info!("Initialized git repository with an initial commit");
        actions.push(BootstrapAction::InitializedRepo);
    }

    if create_remote {
        match create_remote_repo(path, name) {
            Ok(()) => {
                info!("Created remote repository");
                actions.push(BootstrapAction::CreatedRemote);
            }
            Err(e) => {
                warn!(error = %e, "Could not create remote repository; continuing.");
            }
        }
    }

    Ok(actions)
}

fn init_repo_with_commit(path: &Path) -> Result<()> {
    let repo = git2::Repository::init(path)?;
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    // Fall back to a fixed identity when no user.name/user.email is set.
    let signature = repo
        .signature()
        .or_else(|_| git2::Signature::now("projdex", "projdex@localhost"))?;
    repo.commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])?;
    Ok(())
}

/// Creates and pushes a remote through the `gh` CLI, which must be installed
/// and authenticated on the host.
fn create_remote_repo(path: &Path, name: &str) -> Result<()> {
    debug!(%name, "Invoking gh to create a remote.");
    let output = Command::new("gh")
        .args(["repo", "create", name, "--private", "--source"])
        .arg(path)
        .arg("--push")
        .output()
        .map_err(|e| Error::Custom(format!("failed to run gh: {}", e)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Custom(format!(
            "gh exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}
