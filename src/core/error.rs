//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitDashError`] which covers every failure mode of the
//! dashboard. It uses `thiserror` for ergonomic error definitions and includes
//! constructors for the common failure scenarios.
//!
//! # Public API
//! - [`GitDashError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitDashError>`
//!
//! # Error Categories
//! - **Fatal**: repository not found, repository cannot be opened
//! - **Operational**: git2 query failures, checkout failures
//! - **Ambient**: configuration, terminal and I/O errors

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for gitdash
#[derive(Error, Debug)]
pub enum GitDashError {
    // Repository discovery errors
    #[error("Not in a git repository: {path}")]
    NotInGitRepo { path: PathBuf },

    #[error("Could not open repository '{path}': {source}")]
    RepositoryOpen { path: PathBuf, source: git2::Error },

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Invalid UTF-8 path in repository")]
    InvalidUtf8Path,

    // Checkout errors
    #[error("Failed to checkout branch '{branch}': {message}")]
    CheckoutFailed { branch: String, message: String },

    // Configuration errors
    #[error("Invalid configuration '{path}': {message}")]
    InvalidConfig { path: PathBuf, message: String },

    // Runtime errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),

    #[error("Event channel closed")]
    ChannelClosed,

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitDashError
pub type Result<T> = std::result::Result<T, GitDashError>;

impl GitDashError {
    /// Create a repository not found error
    pub fn repository_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotInGitRepo { path: path.into() }
    }

    /// Create a repository open error
    pub fn repository_open(path: impl Into<PathBuf>, source: git2::Error) -> Self {
        Self::RepositoryOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a checkout failed error
    pub fn checkout_failed(branch: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckoutFailed {
            branch: branch.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error must abort startup before the interactive loop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotInGitRepo { .. } | Self::RepositoryOpen { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitDashError::repository_not_found("/tmp/nowhere");
        assert_eq!(err.to_string(), "Not in a git repository: /tmp/nowhere");
    }

    #[test]
    fn test_checkout_failed_error() {
        let err = GitDashError::checkout_failed("dev", "local changes would be overwritten");
        assert_eq!(
            err.to_string(),
            "Failed to checkout branch 'dev': local changes would be overwritten"
        );
    }

    #[test]
    fn test_invalid_config_error() {
        let err = GitDashError::invalid_config("/etc/gitdash.json", "expected value at line 1");
        assert!(err.to_string().contains("/etc/gitdash.json"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_repository_open_error() {
        let source = git2::Error::from_str("corrupt HEAD");
        let err = GitDashError::repository_open("/repo", source);
        assert!(err.to_string().contains("/repo"));
        assert!(err.to_string().contains("corrupt HEAD"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(GitDashError::repository_not_found("/x").is_fatal());
        assert!(GitDashError::repository_open("/x", git2::Error::from_str("boom")).is_fatal());
        assert!(!GitDashError::checkout_failed("main", "nope").is_fatal());
        assert!(!GitDashError::ChannelClosed.is_fatal());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
        let err: GitDashError = parse_err.into();
        assert!(err.to_string().contains("JSON serialization error"));
    }
}
