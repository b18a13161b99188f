//! GitDash - a terminal dashboard for a single git repository.
//!
//! Shows branches, recent commits of the inspected branch, stash entries,
//! language statistics and working-directory status in one scrollable view,
//! and switches branches in the background without blocking input.
//!
//! # Public API
//! - [`core`]: data provider, checkout executor, data model, configuration
//! - [`dashboard`]: state machine, snapshot assembler, render composer and
//!   the interactive runtime

pub mod commands;
pub mod core;
pub mod dashboard;

// Re-export the core public API for external users
pub use crate::core::{
    // Repository access
    checkout_branch,
    find_repository_root,
    // Data model
    Branch,
    CheckoutMode,
    Commit,
    // Configuration
    DashboardConfig,
    FileStatus,
    // Error handling
    GitDashError,
    GitRepo,
    GitStatus,
    LanguageStat,
    LanguageStats,
    RepoInfo,
    RepoSnapshot,
    Result,
    StashEntry,
    WorkingDirStatus,
};

pub use crate::dashboard::{transition, DashboardState, Event, KeyAction, SnapshotAssembler, Theme};
