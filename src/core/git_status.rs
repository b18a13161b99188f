//! Type-safe git file status enumeration.
//!
//! [`GitStatus`] is the status code carried by every working-directory entry.
//!
//! # Key Features
//! - **git2 integration**: Direct conversion from git2::Status flags
//! - **Display formatting**: Short codes for the working-directory panel
//! - **Sorting logic**: Built-in priority ordering for status display

use serde::{Deserialize, Serialize};
use std::fmt;

/// Git file status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitStatus {
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (?)
    Untracked,
    /// Unmerged/conflicted file (U)
    Unmerged,
}

impl GitStatus {
    /// Index-side status, if the flags carry a staged change.
    pub fn from_git2_staged(flags: git2::Status) -> Option<GitStatus> {
        if flags.contains(git2::Status::INDEX_NEW) {
            return Some(GitStatus::Added);
        }
        if flags.contains(git2::Status::INDEX_MODIFIED) {
            return Some(GitStatus::Modified);
        }
        if flags.contains(git2::Status::INDEX_DELETED) {
            return Some(GitStatus::Deleted);
        }
        if flags.contains(git2::Status::INDEX_RENAMED) {
            return Some(GitStatus::Renamed);
        }
        if flags.contains(git2::Status::INDEX_TYPECHANGE) {
            return Some(GitStatus::TypeChanged);
        }

        None
    }

    /// Worktree-side status, if the flags carry an unstaged change.
    pub fn from_git2_unstaged(flags: git2::Status) -> Option<GitStatus> {
        // Conflicts win over everything else on the worktree side
        if flags.contains(git2::Status::CONFLICTED) {
            return Some(GitStatus::Unmerged);
        }

        if flags.contains(git2::Status::WT_NEW) {
            return Some(GitStatus::Untracked);
        }
        if flags.contains(git2::Status::WT_MODIFIED) {
            return Some(GitStatus::Modified);
        }
        if flags.contains(git2::Status::WT_DELETED) {
            return Some(GitStatus::Deleted);
        }
        if flags.contains(git2::Status::WT_RENAMED) {
            return Some(GitStatus::Renamed);
        }
        if flags.contains(git2::Status::WT_TYPECHANGE) {
            return Some(GitStatus::TypeChanged);
        }

        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GitStatus::Modified => "M",
            GitStatus::Added => "A",
            GitStatus::Deleted => "D",
            GitStatus::Renamed => "R",
            GitStatus::TypeChanged => "T",
            GitStatus::Untracked => "?",
            GitStatus::Unmerged => "U",
        }
    }

    /// Sort priority: conflicts, staged, unstaged, untracked.
    pub fn sort_priority(&self, staged: bool) -> u8 {
        match (self, staged) {
            (GitStatus::Unmerged, _) => 0,
            (GitStatus::Added, true) => 1,
            (GitStatus::Modified, true) => 2,
            (GitStatus::Deleted, true) => 3,
            (GitStatus::Renamed, true) => 4,
            (GitStatus::TypeChanged, true) => 5,
            (GitStatus::Modified, false) => 6,
            (GitStatus::Deleted, false) => 7,
            (GitStatus::Renamed, false) => 8,
            (GitStatus::TypeChanged, false) => 9,
            (GitStatus::Untracked, _) => 10,
            _ => 11,
        }
    }
}

impl fmt::Display for GitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
