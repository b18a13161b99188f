//! Events consumed and commands produced by the dashboard state machine.
//!
//! Both are plain data. The runtime turns terminal input, timers and
//! background completions into [`Event`]s, and executes the [`Command`]s that
//! [`super::machine::transition`] returns.

use crate::core::state::{LanguageStats, RepoSnapshot};
use std::time::Duration;

pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// `Esc`: closes the help overlay, quits otherwise.
    Escape,
    ToggleHelp,
    ToggleFocus,
    /// Down / `j`: moves the branch cursor when focused, scrolls otherwise.
    Down,
    /// Up / `k`.
    Up,
    PageDown,
    PageUp,
    Top,
    Bottom,
    Refresh,
    Checkout { force: bool },
}

/// Which assembly a refresh performs.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshMode {
    /// Recompute everything, language statistics included.
    Full,
    /// Reuse these language statistics instead of walking the tree.
    Light { languages: LanguageStats },
}

impl RefreshMode {
    pub fn is_full(&self) -> bool {
        matches!(self, RefreshMode::Full)
    }
}

/// Identifies one refresh request and what it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTicket {
    pub id: u64,
    pub inspected_branch: String,
    pub mode: RefreshMode,
    /// Branch whose checkout this refresh follows, if any.
    pub after_checkout: Option<String>,
}

/// The background operation an `OperationFailed` belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Refresh { id: u64 },
    Checkout { branch: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyAction),
    Resize { width: u16, height: u16 },
    SpinnerTick,
    RefreshCompleted {
        ticket: RefreshTicket,
        snapshot: Box<RepoSnapshot>,
    },
    CheckoutCompleted { branch: String },
    OperationFailed { operation: Operation, cause: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh(RefreshTicket),
    Checkout { branch: String, force: bool },
    ScheduleSpinnerTick(Duration),
    Quit,
}
