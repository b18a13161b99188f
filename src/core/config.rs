//! Dashboard configuration.
//!
//! Configuration is read from a JSON file and then overridden by `GITDASH_*`
//! environment variables. Problems loading configuration are never fatal: the
//! caller gets the defaults together with the error so it can warn the user.

use crate::core::dirs::config_directory;
use crate::core::error::{GitDashError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_COMMIT_COUNT: usize = 10;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;
pub const LOCAL_CONFIG_FILE: &str = ".gitdash.json";
/// YAML names that are recognised only to warn that they are not read.
pub const YAML_CONFIG_FILES: [&str; 2] = [".gitdash.yaml", ".gitdash.yml"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CommitsConfig {
    pub show_count: usize,
    pub show_author: bool,
    pub show_relative_time: bool,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            show_count: DEFAULT_COMMIT_COUNT,
            show_author: true,
            show_relative_time: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub colors: bool,
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            unicode: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Pause after a successful checkout before the dashboard refreshes.
    pub settle_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub commits: CommitsConfig,
    pub display: DisplayConfig,
    pub checkout: CheckoutConfig,
}

impl DashboardConfig {
    /// Load configuration following the lookup order: explicit path, then
    /// `./.gitdash.json`, then the per-user config directory.
    ///
    /// Always yields a usable configuration. The second element carries the
    /// problem encountered, if any, so the CLI can print a warning.
    pub fn load(explicit: Option<&Path>) -> (Self, Option<GitDashError>) {
        let (mut config, problem) = match Self::resolve_file(explicit) {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    (config, None)
                }
                Err(e) => (Self::default(), Some(e)),
            },
            None => {
                let mut search = vec![PathBuf::from(".")];
                search.extend(dirs::home_dir());
                (Self::default(), unread_yaml_config(&search))
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.normalize();
        (config, problem)
    }

    fn resolve_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        config_directory()
            .map(|dir| dir.join("config.json"))
            .filter(|user| user.exists())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GitDashError::invalid_config(path, e.to_string()))?;
        Self::from_json(&content).map_err(|e| GitDashError::invalid_config(path, e.to_string()))
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Apply `GITDASH_<SECTION>_<KEY>` overrides. Unparseable values are
    /// ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count) = parse_override::<usize>(&lookup, "GITDASH_COMMITS_SHOW_COUNT") {
            self.commits.show_count = count;
        }
        if let Some(flag) = parse_bool_override(&lookup, "GITDASH_COMMITS_SHOW_AUTHOR") {
            self.commits.show_author = flag;
        }
        if let Some(flag) = parse_bool_override(&lookup, "GITDASH_COMMITS_SHOW_RELATIVE_TIME") {
            self.commits.show_relative_time = flag;
        }
        if let Some(flag) = parse_bool_override(&lookup, "GITDASH_DISPLAY_COLORS") {
            self.display.colors = flag;
        }
        if let Some(flag) = parse_bool_override(&lookup, "GITDASH_DISPLAY_UNICODE") {
            self.display.unicode = flag;
        }
    }

    fn normalize(&mut self) {
        if self.commits.show_count == 0 {
            self.commits.show_count = DEFAULT_COMMIT_COUNT;
        }
    }
}

/// A `.gitdash.yaml` next to no JSON config would otherwise be ignored
/// silently.
fn unread_yaml_config(search: &[PathBuf]) -> Option<GitDashError> {
    search
        .iter()
        .flat_map(|dir| YAML_CONFIG_FILES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
        .map(|path| {
            GitDashError::invalid_config(
                path,
                format!("YAML configuration is not read, convert it to {LOCAL_CONFIG_FILE}"),
            )
        })
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw}: not a valid value");
            None
        }
    }
}

fn parse_bool_override(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            log::warn!("Ignoring {key}={raw}: expected a boolean");
            None
        }
    }
}
