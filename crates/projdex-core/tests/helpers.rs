use std::fs;
use std::path::Path;
use std::process::Command;

/// Helper function to initialize the tracing subscriber for tests.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Creates a set of small files inside `dir`, creating parent directories
/// as needed.
pub fn write_files(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }
}

/// Helper to initialize a git repo and create a commit with a specific date.
pub fn init_git_repo_with_date(path: &Path, msg: &str, date: &str) {
    Command::new("git")
        .arg("init")
        .current_dir(path)
        .output()
        .unwrap();
    fs::write(path.join("file.txt"), msg).unwrap();
    Command::new("git")
        .arg("add")
        .arg(".")
        .current_dir(path)
        .output()
        .unwrap();
    Command::new("git")
        .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
        .arg("commit")
        .arg("-m")
        .arg(msg)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(path)
        .output()
        .unwrap();
}
