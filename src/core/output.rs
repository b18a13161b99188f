//! Colored output for the command-line shell around the dashboard.
//!
//! These helpers are only used before the terminal is handed to the
//! dashboard or after it has been restored.
//!
//! # Design Principles
//! - **Consistent color scheme**: red for errors, yellow for warnings, bright_black for hints
//! - **stderr for diagnostics**: stdout stays clean for `--version` and friends

use colored::*;

/// Formats an error line.
///
/// # Format
/// ```text
/// ✕ Error: <message>
/// ```
pub fn format_error(message: &str) -> String {
    format!("{} {}", "✕ Error:".red(), message.white())
}

/// Formats a warning line.
///
/// # Format
/// ```text
/// ! Warning: <message>
/// ```
pub fn format_warning(message: &str) -> String {
    format!("{} {}", "! Warning:".yellow(), message.white())
}

/// Prints an error message with consistent styling to stderr
pub fn print_error(message: &str) {
    eprintln!("\n{}\n", format_error(message));
}

/// Prints a warning message with consistent styling to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

/// Prints a muted hint line to stderr
pub fn print_hint(message: &str) {
    eprintln!("{}", message.bright_black());
}
