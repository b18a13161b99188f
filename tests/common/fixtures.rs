//! Predefined repository scenarios
//!
//! Provides repositories in the shapes the dashboard tests keep needing so
//! every test starts from the same history.

#![allow(dead_code)]

use super::repository::*;
use gitdash::core::error::Result;

/// Scenario: `main` (checked out) and `dev`, where `dev` carries two commits
/// of its own on top of main's history.
pub fn create_main_dev_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    commit_files(
        &repo.path,
        &[("src/main.rs", "main: bootstrap"), ("README.md", "main: readme")],
    )?;
    git_branch(&repo.path, "dev")?;
    git_checkout(&repo.path, "dev")?;
    commit_files(
        &repo.path,
        &[("src/dev.rs", "dev: add module"), ("src/util.py", "dev: add script")],
    )?;
    git_checkout(&repo.path, "main")?;

    Ok(repo)
}

/// Scenario: main/dev repository with a stash entry, a modified tracked file
/// and an untracked file.
pub fn create_busy_repo() -> Result<TestRepo> {
    let repo = create_main_dev_repo()?;

    create_file(&repo.path, "README.md", "stashed edit\n")?;
    git_stash(&repo.path, "half-done readme")?;

    create_file(&repo.path, "README.md", "work in progress\n")?;
    create_file(&repo.path, "notes.txt", "scratch\n")?;

    Ok(repo)
}
