//! Repository data provider.
//!
//! This module provides read-only queries against a repository through the
//! [`GitRepo`] struct, a thin wrapper over `git2`. Every query returns an
//! immutable value from [`crate::core::state`]; nothing here caches state
//! between calls.
//!
//! # Public API
//! - [`find_repository_root`]: walk ancestors looking for a `.git` marker
//! - [`GitRepo`]: branches, commits, working-directory status, stash,
//!   language statistics and repository info

use crate::core::{
    error::{GitDashError, Result},
    git_status::GitStatus,
    languages,
    state::{Branch, Commit, FileStatus, LanguageStats, RepoInfo, StashEntry, WorkingDirStatus},
};
use chrono::{DateTime, Utc};
use git2::{BranchType, ErrorCode, ObjectType, Oid, Repository, Sort, StatusOptions};
use std::path::{Path, PathBuf};

/// Walk up from `start` to the first directory containing a `.git` entry.
pub fn find_repository_root<P: AsRef<Path>>(start: P) -> Result<PathBuf> {
    let start = start.as_ref();
    let absolute = std::path::absolute(start)?;

    let mut current = Some(absolute.as_path());
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            log::debug!("Found repository root at {}", dir.display());
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }

    Err(GitDashError::repository_not_found(absolute))
}

fn short_hash(oid: Oid) -> String {
    oid.to_string()[..7].to_string()
}

fn to_utc(time: git2::Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.seconds(), 0)
}

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path` (no discovery).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let repo =
            Repository::open(&root).map_err(|e| GitDashError::repository_open(&root, e))?;
        Ok(GitRepo { repo, root })
    }

    /// Label for the checked-out branch: its short name, `detached at <hash>`
    /// for a detached HEAD, or an empty string when HEAD is unborn.
    pub fn current_branch(&self) -> String {
        match self.repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().unwrap_or_default().to_string(),
            Ok(head) => head
                .target()
                .map(|oid| format!("detached at {}", short_hash(oid)))
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    fn head_branch_name(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_string)
    }

    pub fn repo_info(&self) -> Result<RepoInfo> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);
        let is_clean = match self.repo.statuses(Some(&mut opts)) {
            Ok(statuses) => statuses.is_empty(),
            Err(e) => {
                log::warn!("Could not read status for clean flag: {e}");
                true
            }
        };

        Ok(RepoInfo {
            path: self.root.clone(),
            current_branch: self.current_branch(),
            is_clean,
            remotes: self.remote_urls()?,
        })
    }

    fn remote_urls(&self) -> Result<Vec<String>> {
        let names = self.repo.remotes()?;
        let mut urls = Vec::new();
        for name in names.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            if let Some(url) = remote.url() {
                urls.push(url.to_string());
            }
        }
        Ok(urls)
    }

    /// Local branches, most recently committed first.
    pub fn list_branches(&self) -> Result<Vec<Branch>> {
        let current = self.head_branch_name();
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let name = match branch.name()? {
                Some(name) => name.to_string(),
                None => {
                    log::warn!("Skipping branch with a non UTF-8 name");
                    continue;
                }
            };

            let reference = branch.get();
            let hash = reference.target().map(|oid| oid.to_string()).unwrap_or_default();
            let last_commit = reference
                .peel_to_commit()
                .ok()
                .and_then(|commit| to_utc(commit.author().when()));

            branches.push(Branch {
                is_current: current.as_deref() == Some(name.as_str()),
                name,
                last_commit,
                hash,
            });
        }

        branches.sort_by(|a, b| {
            b.last_commit
                .cmp(&a.last_commit)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(branches)
    }

    /// Resolve a branch name to its tip, falling back to HEAD when the name is
    /// empty or not a local branch. `None` when HEAD is unborn.
    fn resolve_tip(&self, branch_name: &str) -> Result<Option<Oid>> {
        if !branch_name.is_empty() {
            match self.repo.find_branch(branch_name, BranchType::Local) {
                Ok(branch) => return Ok(branch.get().target()),
                Err(e) if e.code() == ErrorCode::NotFound => {
                    log::debug!("Branch '{branch_name}' not found, falling back to HEAD");
                }
                Err(e) => return Err(e.into()),
            }
        }

        match self.repo.head() {
            Ok(head) => Ok(head.target()),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// At most `limit` commits reachable from `branch_name`, newest first.
    pub fn recent_commits(&self, branch_name: &str, limit: usize) -> Result<Vec<Commit>> {
        let tip = match self.resolve_tip(branch_name)? {
            Some(oid) => oid,
            None => return Ok(Vec::new()),
        };

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(tip)?;

        let mut commits = Vec::with_capacity(limit);
        for oid in walk.take(limit) {
            let commit = self.repo.find_commit(oid?)?;
            let author = commit.author();
            commits.push(Commit {
                hash: commit.id().to_string(),
                message: commit.message().unwrap_or_default().to_string(),
                author: author.name().unwrap_or_default().to_string(),
                when: to_utc(author.when()).unwrap_or_default(),
            });
        }

        Ok(commits)
    }

    pub fn working_dir_status(&self) -> Result<WorkingDirStatus> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut status = WorkingDirStatus {
            branch_name: self.current_branch(),
            ..Default::default()
        };

        for entry in statuses.iter() {
            let path = PathBuf::from(entry.path().ok_or(GitDashError::InvalidUtf8Path)?);
            let flags = entry.status();

            if let Some(code) = GitStatus::from_git2_staged(flags) {
                status.staged += 1;
                status.files.push(FileStatus {
                    path: path.clone(),
                    status: code,
                    staged: true,
                });
            }

            if let Some(code) = GitStatus::from_git2_unstaged(flags) {
                match code {
                    GitStatus::Untracked => status.untracked += 1,
                    GitStatus::Unmerged => status.conflicted += 1,
                    _ => status.modified += 1,
                }
                status.files.push(FileStatus {
                    path,
                    status: code,
                    staged: false,
                });
            }
        }

        status.files.sort_by(|a, b| {
            a.status
                .sort_priority(a.staged)
                .cmp(&b.status.sort_priority(b.staged))
                .then_with(|| a.path.cmp(&b.path))
        });

        Ok(status)
    }

    /// Stash entries, `stash@{0}` first. Needs `&mut` because libgit2 stash
    /// iteration does.
    pub fn stash_list(&mut self) -> Result<Vec<StashEntry>> {
        let mut raw = Vec::new();
        self.repo.stash_foreach(|index, message, oid| {
            raw.push((index, message.to_string(), *oid));
            true
        })?;

        Ok(raw
            .into_iter()
            .map(|(id, message, oid)| StashEntry {
                id,
                message,
                timestamp: self
                    .repo
                    .find_commit(oid)
                    .ok()
                    .and_then(|commit| to_utc(commit.time())),
                hash: oid.to_string(),
            })
            .collect())
    }

    /// Language composition of the tree at the tip of `branch_name` (HEAD
    /// fallback). An unborn HEAD yields empty statistics.
    pub fn language_stats(&self, branch_name: &str) -> Result<LanguageStats> {
        let tip = match self.resolve_tip(branch_name)? {
            Some(oid) => oid,
            None => {
                return Ok(LanguageStats {
                    branch: branch_name.to_string(),
                    ..Default::default()
                })
            }
        };

        let tree = self.repo.find_commit(tip)?.tree()?;
        let mut paths = Vec::new();
        tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    paths.push(PathBuf::from(format!("{root}{name}")));
                }
            }
            git2::TreeWalkResult::Ok
        })?;

        Ok(LanguageStats {
            branch: branch_name.to_string(),
            total_files: paths.len(),
            languages: languages::tally(paths.iter().map(PathBuf::as_path)),
        })
    }
}
