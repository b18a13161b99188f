//! Core functionality for gitdash.
//!
//! This module provides the repository data provider, the checkout executor,
//! the data model and the ambient pieces (errors, configuration, logging,
//! CLI output).

pub mod checkout;
pub mod config;
pub mod dirs;
pub mod error;
pub mod git;
pub mod git_status;
pub mod languages;
pub mod logging;
pub mod output;
pub mod state;

// === Error handling ===
pub use error::{GitDashError, Result};

// === Repository access ===
pub use checkout::{checkout_branch, CheckoutMode};
pub use git::{find_repository_root, GitRepo};

// === Data model ===
pub use git_status::GitStatus;
pub use state::{
    Branch, Commit, FileStatus, LanguageStat, LanguageStats, RepoInfo, RepoSnapshot, StashEntry,
    WorkingDirStatus,
};

// === Configuration ===
pub use config::DashboardConfig;

// === Output formatting ===
pub use output::{print_error, print_hint, print_warning};
