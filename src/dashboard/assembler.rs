//! Snapshot assembler.
//!
//! Builds one consistent [`RepoSnapshot`] from the data provider. The
//! repository is reopened on every call so a checkout that happened since the
//! last assembly is always observed. Only a failure to open the repository is
//! fatal; each other query degrades to an empty value on its own.

use crate::core::error::Result;
use crate::core::git::GitRepo;
use crate::core::state::{RepoInfo, RepoSnapshot};
use crate::dashboard::event::RefreshMode;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SnapshotAssembler {
    repo_path: PathBuf,
    commit_count: usize,
}

fn degrade<T: Default>(field: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("Could not read {field}, showing it empty: {e}");
        T::default()
    })
}

impl SnapshotAssembler {
    pub fn new(repo_path: impl Into<PathBuf>, commit_count: usize) -> Self {
        Self {
            repo_path: repo_path.into(),
            commit_count,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Assemble a snapshot whose commits and language statistics follow
    /// `inspected_branch` (HEAD when empty or unknown).
    pub fn assemble(&self, inspected_branch: &str, mode: &RefreshMode) -> Result<RepoSnapshot> {
        let mut repo = GitRepo::open(&self.repo_path)?;
        log::debug!(
            "Assembling {} snapshot for '{}'",
            if mode.is_full() { "full" } else { "light" },
            inspected_branch
        );

        let info = repo.repo_info().unwrap_or_else(|e| {
            log::warn!("Could not read repository info: {e}");
            RepoInfo {
                path: self.repo_path.clone(),
                current_branch: repo.current_branch(),
                ..Default::default()
            }
        });
        let branches = degrade("branches", repo.list_branches());
        let commits = degrade(
            "commits",
            repo.recent_commits(inspected_branch, self.commit_count),
        );
        let status = degrade("working directory status", repo.working_dir_status());
        let stash = degrade("stash", repo.stash_list());

        let languages = match mode {
            RefreshMode::Light { languages } => languages.clone(),
            RefreshMode::Full => {
                // Label the stats with the branch actually walked
                let anchor = if branches.iter().any(|b| b.name == inspected_branch) {
                    inspected_branch
                } else {
                    info.current_branch.as_str()
                };
                degrade("language statistics", repo.language_stats(anchor))
            }
        };

        Ok(RepoSnapshot {
            info,
            branches,
            commits,
            status,
            stash,
            languages,
        })
    }
}
