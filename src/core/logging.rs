//! Logger initialisation.
//!
//! The terminal belongs to the dashboard while it runs, so records are written
//! to `<cache dir>/gitdash.log` instead of stderr.

use crate::core::dirs::cache_directory;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "gitdash.log";

pub fn log_file_path() -> Option<PathBuf> {
    cache_directory().map(|dir| dir.join(LOG_FILE_NAME))
}

/// Initialise `env_logger`. `--debug` forces the `debug` level, otherwise
/// `RUST_LOG` applies with `info` as the default. Returns the log file path
/// when logging is active.
pub fn init(debug: bool) -> Option<PathBuf> {
    let path = log_file_path();
    let file = path.as_ref().and_then(|path| {
        path.parent()
            .map(fs::create_dir_all)
            .transpose()
            .ok()
            .and_then(|_| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .ok()
            })
    });

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }

    let active = match file {
        Some(file) => {
            builder.target(Target::Pipe(Box::new(file)));
            true
        }
        None => {
            builder.filter_level(LevelFilter::Off);
            false
        }
    };

    // A logger may already be installed (tests, embedding); keep it.
    if builder.try_init().is_err() || !active {
        return None;
    }
    path
}
