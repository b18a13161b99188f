//! Shared test utilities for gitdash integration tests
//!
//! Every helper works on a real repository created in a temporary directory
//! by shelling out to `git`.

pub mod assertions;
pub mod fixtures;
pub mod repository;
