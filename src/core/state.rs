//! Repository data model.
//!
//! Every type here is an immutable projection of repository state. A
//! [`RepoSnapshot`] is rebuilt wholesale on each refresh and never patched in
//! place.
//!
//! # Public API
//! - [`Branch`], [`Commit`], [`StashEntry`], [`LanguageStat`]: row types
//! - [`FileStatus`], [`WorkingDirStatus`]: working-directory state with counts
//! - [`RepoInfo`]: repository path, checked-out branch, remotes
//! - [`RepoSnapshot`]: one consistent view of all of the above

use crate::core::git_status::GitStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
    pub last_commit: Option<DateTime<Utc>>,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub when: DateTime<Utc>,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStatus {
    pub path: PathBuf,
    pub status: GitStatus,
    pub staged: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkingDirStatus {
    pub files: Vec<FileStatus>,
    pub branch_name: String,
    pub modified: usize,
    pub staged: usize,
    pub untracked: usize,
    pub conflicted: usize,
}

impl WorkingDirStatus {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StashEntry {
    pub id: usize,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub files: usize,
    pub percentage: f64,
}

/// Language composition of one branch tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageStats {
    /// Branch whose tree was walked.
    pub branch: String,
    pub total_files: usize,
    pub languages: Vec<LanguageStat>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepoInfo {
    pub path: PathBuf,
    /// Checked-out branch; empty when HEAD is unborn.
    pub current_branch: String,
    pub is_clean: bool,
    pub remotes: Vec<String>,
}

/// One consistent view of the repository.
///
/// `commits` and `languages` are computed for the inspected branch, which may
/// differ from `info.current_branch`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub info: RepoInfo,
    pub branches: Vec<Branch>,
    pub commits: Vec<Commit>,
    pub status: WorkingDirStatus,
    pub stash: Vec<StashEntry>,
    pub languages: LanguageStats,
}

impl RepoSnapshot {
    pub fn branch_index(&self, name: &str) -> Option<usize> {
        self.branches.iter().position(|b| b.name == name)
    }

    pub fn current_branch_index(&self) -> Option<usize> {
        self.branches.iter().position(|b| b.is_current)
    }
}
