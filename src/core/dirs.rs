//! Per-user directories, namespaced under `gitdash`.
//!
//! `dirs` already honours `XDG_CONFIG_HOME` / `XDG_CACHE_HOME` on Linux and
//! picks the platform locations elsewhere. `None` when no home is known.

use std::path::PathBuf;

const APP_DIR: &str = "gitdash";

pub fn config_directory() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR))
}

pub fn cache_directory() -> Option<PathBuf> {
    dirs::cache_dir().map(|base| base.join(APP_DIR))
}
