//! Dashboard state machine.
//!
//! All display and data state lives in [`DashboardState`]. Events arrive one
//! at a time through [`transition`], which mutates the state and returns the
//! commands the runtime should execute. No I/O happens here.
//!
//! Invariants kept after every transition:
//! - `selected` indexes the current branch list, or is 0 when it is empty
//! - `loading` is true iff a refresh or checkout is outstanding
//! - at most one checkout is outstanding
//! - a snapshot is only ever replaced whole, by the newest refresh issued

use crate::core::state::{Branch, RepoSnapshot};
use crate::dashboard::event::{
    Command, Event, KeyAction, Operation, RefreshMode, RefreshTicket, SPINNER_INTERVAL,
};
use crate::dashboard::render;

pub const SPINNER_PHASES: usize = 4;
pub const MIN_PANEL_WIDTH: usize = 40;
pub const HEADER_ROWS: u16 = 3;
pub const FOOTER_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Branches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckoutPhase {
    /// The executor is switching the working tree.
    Executing,
    /// The tree switched; waiting for the follow-up refresh.
    Refreshing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub snapshot: RepoSnapshot,
    pub inspected_branch: String,
    pub selected: usize,
    pub focus: Focus,
    pub show_help: bool,
    pub loading: bool,
    /// Branch being checked out, empty if none.
    pub checking_out: String,
    pub spinner: usize,
    pub status_message: String,
    pub scroll: usize,
    pub width: u16,
    pub height: u16,
    pub panel_width: usize,
    pub terminating: bool,
    checkout_phase: Option<CheckoutPhase>,
    /// Newest refresh issued and not yet landed. Older ones are stale.
    pending_refresh: Option<u64>,
    next_refresh_id: u64,
    /// Refresh dropped because it landed while a checkout was executing.
    /// Reissued if that checkout fails.
    deferred_refresh: Option<RefreshMode>,
    /// The status shows a failure that a landed light refresh keeps.
    error_pinned: bool,
    spinner_armed: bool,
}

impl DashboardState {
    /// Initial state around a synchronously assembled snapshot.
    pub fn new(snapshot: RepoSnapshot, width: u16, height: u16) -> Self {
        let inspected_branch = snapshot.info.current_branch.clone();
        let selected = snapshot.current_branch_index().unwrap_or(0);

        Self {
            snapshot,
            inspected_branch,
            selected,
            focus: Focus::None,
            show_help: false,
            loading: false,
            checking_out: String::new(),
            spinner: 0,
            status_message: String::new(),
            scroll: 0,
            width,
            height,
            panel_width: panel_width_for(width),
            terminating: false,
            checkout_phase: None,
            pending_refresh: None,
            next_refresh_id: 1,
            deferred_refresh: None,
            error_pinned: false,
            spinner_armed: false,
        }
    }

    pub fn selected_branch(&self) -> Option<&Branch> {
        self.snapshot.branches.get(self.selected)
    }

    pub fn is_inspecting_other_branch(&self) -> bool {
        !self.inspected_branch.is_empty()
            && self.inspected_branch != self.snapshot.info.current_branch
    }

    pub fn viewport_height(&self) -> usize {
        usize::from(self.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS))
    }

    pub fn max_scroll(&self) -> usize {
        render::body_line_count(self).saturating_sub(self.viewport_height())
    }

    fn checkout_in_progress(&self) -> bool {
        self.checkout_phase.is_some()
    }

    /// Branch whose post-checkout refresh is still outstanding.
    fn checkout_follow_up(&self) -> Option<String> {
        (self.checkout_phase == Some(CheckoutPhase::Refreshing)).then(|| self.checking_out.clone())
    }

    fn defer_refresh(&mut self, mode: RefreshMode) {
        let full = mode.is_full()
            || self
                .deferred_refresh
                .as_ref()
                .is_some_and(RefreshMode::is_full);
        self.deferred_refresh = Some(if full { RefreshMode::Full } else { mode });
    }

    fn sync_loading(&mut self) {
        self.loading = self.pending_refresh.is_some() || self.checkout_in_progress();
    }

    fn clear_checkout(&mut self) {
        self.checkout_phase = None;
        self.checking_out.clear();
    }

    /// Arm the spinner timer unless a tick is already in flight.
    fn arm_spinner(&mut self, commands: &mut Vec<Command>) {
        if !self.spinner_armed {
            self.spinner_armed = true;
            commands.push(Command::ScheduleSpinnerTick(SPINNER_INTERVAL));
        }
    }

    fn issue_refresh(
        &mut self,
        mode: RefreshMode,
        after_checkout: Option<String>,
        commands: &mut Vec<Command>,
    ) {
        let id = self.next_refresh_id;
        self.next_refresh_id += 1;
        self.pending_refresh = Some(id);
        self.error_pinned = false;
        self.sync_loading();

        log::debug!(
            "Issuing refresh #{id} for '{}' ({})",
            self.inspected_branch,
            if mode.is_full() { "full" } else { "light" }
        );
        commands.push(Command::Refresh(RefreshTicket {
            id,
            inspected_branch: self.inspected_branch.clone(),
            mode,
            after_checkout,
        }));
        self.arm_spinner(commands);
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn clamp_selection(&mut self) {
        let len = self.snapshot.branches.len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }
}

pub fn panel_width_for(width: u16) -> usize {
    usize::from(width).saturating_sub(4).max(MIN_PANEL_WIDTH)
}

/// Apply one event and return the commands to execute.
///
/// Once `terminating` is set every further event is ignored.
pub fn transition(state: &mut DashboardState, event: Event) -> Vec<Command> {
    if state.terminating {
        log::debug!("Dropping event after quit: {event:?}");
        return Vec::new();
    }

    let mut commands = Vec::new();
    match event {
        Event::Key(action) => handle_key(state, action, &mut commands),

        Event::Resize { width, height } => {
            state.width = width;
            state.height = height;
            state.panel_width = panel_width_for(width);
            state.clamp_scroll();
        }

        Event::SpinnerTick => {
            if state.loading {
                state.spinner = (state.spinner + 1) % SPINNER_PHASES;
                commands.push(Command::ScheduleSpinnerTick(SPINNER_INTERVAL));
            } else {
                state.spinner_armed = false;
            }
        }

        Event::RefreshCompleted { ticket, snapshot } => apply_refresh(state, ticket, *snapshot),

        Event::CheckoutCompleted { branch } => {
            if state.checkout_phase != Some(CheckoutPhase::Executing) || state.checking_out != branch
            {
                log::warn!("Ignoring completion of unexpected checkout '{branch}'");
                return commands;
            }
            state.checkout_phase = Some(CheckoutPhase::Refreshing);
            state.deferred_refresh = None;
            state.status_message = format!("Checked out {branch}, refreshing…");
            state.issue_refresh(RefreshMode::Full, Some(branch), &mut commands);
        }

        Event::OperationFailed { operation, cause } => {
            fail_operation(state, operation, cause, &mut commands)
        }
    }

    commands
}

fn handle_key(state: &mut DashboardState, action: KeyAction, commands: &mut Vec<Command>) {
    match action {
        KeyAction::Quit => {
            state.terminating = true;
            commands.push(Command::Quit);
        }
        KeyAction::Escape => {
            if state.show_help {
                state.show_help = false;
            } else {
                state.terminating = true;
                commands.push(Command::Quit);
            }
        }
        KeyAction::ToggleHelp => state.show_help = !state.show_help,
        KeyAction::Refresh => {
            state.status_message = "Refreshing…".to_string();
            let after_checkout = state.checkout_follow_up();
            state.issue_refresh(RefreshMode::Full, after_checkout, commands);
        }
        // The help overlay hides the dashboard; nothing below acts on it
        _ if state.show_help => {}
        KeyAction::ToggleFocus => {
            state.focus = match state.focus {
                Focus::None => Focus::Branches,
                Focus::Branches => Focus::None,
            };
        }
        KeyAction::Down => match state.focus {
            Focus::Branches => move_selection(state, 1, commands),
            Focus::None => scroll_by(state, 1),
        },
        KeyAction::Up => match state.focus {
            Focus::Branches => move_selection(state, -1, commands),
            Focus::None => scroll_by(state, -1),
        },
        KeyAction::PageDown | KeyAction::PageUp => {
            let page = state.viewport_height().max(1) as isize;
            let delta = if action == KeyAction::PageDown { page } else { -page };
            scroll_by(state, delta);
        }
        KeyAction::Top => state.scroll = 0,
        KeyAction::Bottom => state.scroll = state.max_scroll(),
        KeyAction::Checkout { force } => start_checkout(state, force, commands),
    }
}

fn scroll_by(state: &mut DashboardState, delta: isize) {
    let target = state.scroll.saturating_add_signed(delta);
    state.scroll = target.min(state.max_scroll());
}

fn move_selection(state: &mut DashboardState, delta: isize, commands: &mut Vec<Command>) {
    let len = state.snapshot.branches.len();
    if len == 0 {
        return;
    }

    let target = state.selected.saturating_add_signed(delta).min(len - 1);
    if target == state.selected {
        return;
    }

    state.selected = target;
    state.inspected_branch = state.snapshot.branches[target].name.clone();
    let (mode, after_checkout) = match state.checkout_follow_up() {
        // Superseding the post-checkout refresh must not lose what it does
        Some(branch) => (RefreshMode::Full, Some(branch)),
        None => (
            RefreshMode::Light {
                languages: state.snapshot.languages.clone(),
            },
            None,
        ),
    };
    state.issue_refresh(mode, after_checkout, commands);
}

fn start_checkout(state: &mut DashboardState, force: bool, commands: &mut Vec<Command>) {
    if state.focus != Focus::Branches {
        return;
    }
    if state.checkout_in_progress() {
        state.status_message = format!("Checkout of {} already in progress", state.checking_out);
        return;
    }
    let Some((name, is_current)) = state
        .selected_branch()
        .map(|branch| (branch.name.clone(), branch.is_current))
    else {
        return;
    };
    if is_current {
        state.status_message = format!("Already on '{name}'");
        return;
    }

    state.checking_out = name.clone();
    state.checkout_phase = Some(CheckoutPhase::Executing);
    state.deferred_refresh = None;
    state.error_pinned = false;
    state.spinner = 0;
    state.status_message = if force {
        format!("Force checking out {name}…")
    } else {
        format!("Checking out {name}…")
    };
    state.sync_loading();

    log::debug!("Issuing checkout of '{name}' (force: {force})");
    commands.push(Command::Checkout { branch: name, force });
    state.arm_spinner(commands);
}

fn apply_refresh(state: &mut DashboardState, ticket: RefreshTicket, snapshot: RepoSnapshot) {
    if state.pending_refresh != Some(ticket.id) || ticket.inspected_branch != state.inspected_branch
    {
        log::debug!("Discarding superseded refresh #{}", ticket.id);
        return;
    }

    state.pending_refresh = None;
    if state.checkout_phase == Some(CheckoutPhase::Executing) {
        // The tree is about to change under this result
        log::debug!("Deferring refresh #{} that raced a checkout", ticket.id);
        state.defer_refresh(ticket.mode);
        state.sync_loading();
        return;
    }

    let unchanged = state.snapshot == snapshot;
    state.snapshot = snapshot;

    match state.snapshot.branch_index(&state.inspected_branch) {
        Some(index) => state.selected = index,
        None => {
            state.inspected_branch = state.snapshot.info.current_branch.clone();
            match state.snapshot.current_branch_index() {
                Some(index) => state.selected = index,
                None => state.clamp_selection(),
            }
        }
    }

    state.status_message = match (&ticket.after_checkout, &ticket.mode) {
        (Some(branch), _) => format!("Checked out {branch}"),
        (None, RefreshMode::Full) if unchanged => "Already up to date".to_string(),
        (None, RefreshMode::Full) => "Refreshed".to_string(),
        (None, RefreshMode::Light { .. }) if state.error_pinned => state.status_message.clone(),
        (None, RefreshMode::Light { .. }) => format!("Inspecting {}", state.inspected_branch),
    };

    state.clear_checkout();
    state.sync_loading();
    state.clamp_scroll();
}

fn fail_operation(
    state: &mut DashboardState,
    operation: Operation,
    cause: String,
    commands: &mut Vec<Command>,
) {
    let mut resync = None;
    match operation {
        Operation::Refresh { id } => {
            if state.pending_refresh != Some(id) {
                log::debug!("Discarding failure of superseded refresh #{id}: {cause}");
                return;
            }
            state.pending_refresh = None;
            if state.checkout_phase == Some(CheckoutPhase::Refreshing) {
                state.clear_checkout();
            }
        }
        Operation::Checkout { branch } => {
            if state.checking_out != branch {
                log::debug!("Discarding failure of unexpected checkout '{branch}': {cause}");
                return;
            }
            state.clear_checkout();
            // An outstanding refresh now lands normally; a dropped one is reissued
            let deferred = state.deferred_refresh.take();
            if state.pending_refresh.is_none() {
                resync = deferred;
            }
        }
    }

    log::error!("Operation failed: {cause}");
    state.status_message = format!("Error: {cause}");
    state.sync_loading();
    if let Some(mode) = resync {
        state.issue_refresh(mode, None, commands);
    }
    state.error_pinned = true;
}
