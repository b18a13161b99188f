//! Checkout executor.
//!
//! Switching branches mutates refs and the working tree, so it goes through
//! the `git` binary like every other write the tool performs. The caller is
//! expected to reopen the repository afterwards rather than reuse a handle.

use crate::core::error::{GitDashError, Result};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// How a branch switch treats local modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// Refuse when local changes would be overwritten.
    Safe,
    /// Throw away local changes (`git checkout -f`).
    Force,
}

impl CheckoutMode {
    pub fn from_force(force: bool) -> Self {
        if force {
            CheckoutMode::Force
        } else {
            CheckoutMode::Safe
        }
    }
}

/// Switch the working tree at `workdir` to `branch`, then wait `settle` so
/// filesystems that publish directory changes lazily catch up.
pub fn checkout_branch(
    workdir: &Path,
    branch: &str,
    mode: CheckoutMode,
    settle: Duration,
) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.arg("checkout");
    if mode == CheckoutMode::Force {
        cmd.arg("-f");
    }
    cmd.arg(branch).arg("--").current_dir(workdir);

    log::debug!("Running git checkout {branch} ({mode:?}) in {}", workdir.display());
    let output = cmd.output().map_err(GitDashError::Io)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitDashError::checkout_failed(branch, stderr.trim()));
    }

    if !settle.is_zero() {
        std::thread::sleep(settle);
    }
    log::info!("Checked out '{branch}'");
    Ok(())
}
