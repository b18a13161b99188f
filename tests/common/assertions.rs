//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the fatal repository lookup error
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks for a configuration warning
pub fn config_warning() -> impl Predicate<str> {
    predicates::str::contains("Warning:").and(predicates::str::contains("using defaults"))
}

/// Creates a predicate that checks a JSON snapshot names the checked-out branch
pub fn has_current_branch(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\"current_branch\": \"{name}\""))
}
