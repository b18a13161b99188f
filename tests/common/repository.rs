//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories and driving them into
//! the states the dashboard has to display.

#![allow(dead_code)]

use gitdash::core::error::{GitDashError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs `git` in `repo_path`, failing when git exits non-zero
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(GitDashError::Io)?;

    if !output.status.success() {
        return Err(GitDashError::Io(io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Sets up a fresh git repository on `main` with no commits
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitDashError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "-b", "main"])?;
    // Set git config to avoid prompts during tests
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Creates a file (and its parent directories) in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let target = repo_path.join(filename);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, content)?;
    Ok(())
}

/// Adds a file to the git index ("." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename]).map(drop)
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message]).map(drop)
}

/// Creates `name` at HEAD without switching to it
pub fn git_branch(repo_path: &Path, name: &str) -> Result<()> {
    git(repo_path, &["branch", name]).map(drop)
}

pub fn git_checkout(repo_path: &Path, name: &str) -> Result<()> {
    git(repo_path, &["checkout", name]).map(drop)
}

pub fn git_stash(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["stash", "push", "-m", message]).map(drop)
}

/// Name of the checked-out branch as git reports it
pub fn head_branch(repo_path: &Path) -> Result<String> {
    git(repo_path, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Commits one new file per message, in order
pub fn commit_files(repo_path: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (filename, message) in files {
        create_file(repo_path, filename, &format!("{message}\n"))?;
        git_add(repo_path, filename)?;
        git_commit(repo_path, message)?;
    }
    Ok(())
}
