//! Interactive driver.
//!
//! Owns the terminal and the event queue. Every event goes through
//! [`transition`] one at a time; the commands it returns are executed by
//! [`Workers`], whose threads only ever talk back by sending one event. The
//! spinner timer is a crossbeam `after` channel selected next to the queue.

use crate::core::checkout::{checkout_branch, CheckoutMode};
use crate::core::error::{GitDashError, Result};
use crate::dashboard::assembler::SnapshotAssembler;
use crate::dashboard::event::{Command, Event, Operation, RefreshTicket};
use crate::dashboard::input;
use crate::dashboard::machine::{transition, DashboardState};
use crate::dashboard::render::compose;
use crate::dashboard::theme::Theme;
use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::panic;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const INPUT_POLL: Duration = Duration::from_millis(200);

static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Raw mode and alternate screen for as long as the guard lives, restored
/// on drop and before a panic message is printed.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().map_err(GitDashError::Terminal)?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide).map_err(GitDashError::Terminal)?;

        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            prev(info);
        }));
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Safe to call more than once.
fn restore_terminal() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Executes commands off the event loop.
#[derive(Debug, Clone)]
pub struct Workers {
    assembler: SnapshotAssembler,
    workdir: PathBuf,
    settle: Duration,
    tx: Sender<Event>,
}

impl Workers {
    pub fn new(
        assembler: SnapshotAssembler,
        workdir: PathBuf,
        settle: Duration,
        tx: Sender<Event>,
    ) -> Self {
        Self {
            assembler,
            workdir,
            settle,
            tx,
        }
    }

    pub fn execute(&self, command: Command) {
        match command {
            Command::Refresh(ticket) => self.spawn_refresh(ticket),
            Command::Checkout { branch, force } => self.spawn_checkout(branch, force),
            // The event loop owns the spinner timer and observes `terminating`
            Command::ScheduleSpinnerTick(_) | Command::Quit => {}
        }
    }

    fn spawn_refresh(&self, ticket: RefreshTicket) {
        let assembler = self.assembler.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = match assembler.assemble(&ticket.inspected_branch, &ticket.mode) {
                Ok(snapshot) => Event::RefreshCompleted {
                    ticket,
                    snapshot: Box::new(snapshot),
                },
                Err(e) => {
                    log::warn!("Refresh #{} failed: {e}", ticket.id);
                    Event::OperationFailed {
                        operation: Operation::Refresh { id: ticket.id },
                        cause: e.to_string(),
                    }
                }
            };
            // A closed channel means the dashboard already quit
            let _ = tx.send(event);
        });
    }

    fn spawn_checkout(&self, branch: String, force: bool) {
        let workdir = self.workdir.clone();
        let settle = self.settle;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let mode = CheckoutMode::from_force(force);
            let event = match checkout_branch(&workdir, &branch, mode, settle) {
                Ok(()) => Event::CheckoutCompleted { branch },
                Err(e) => {
                    log::warn!("Checkout of '{branch}' failed: {e}");
                    Event::OperationFailed {
                        operation: Operation::Checkout { branch },
                        cause: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }
}

/// Forward terminal input into the queue until `stop` is raised.
fn spawn_input_thread(tx: Sender<Event>, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match crossterm::event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::error!("Terminal input failed: {e}");
                    break;
                }
            }
            match crossterm::event::read() {
                Ok(raw) => {
                    if let Some(event) = input::translate(raw) {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    log::error!("Terminal input failed: {e}");
                    break;
                }
            }
        }
    });
}

/// Run the dashboard until the user quits.
pub fn run(
    mut state: DashboardState,
    assembler: SnapshotAssembler,
    settle: Duration,
    theme: Theme,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).map_err(GitDashError::Terminal)?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let workdir = assembler.repo_path().to_path_buf();
    let workers = Workers::new(assembler, workdir, settle, tx.clone());
    let stop = Arc::new(AtomicBool::new(false));
    spawn_input_thread(tx, Arc::clone(&stop));

    let (width, height) = crossterm::terminal::size().map_err(GitDashError::Terminal)?;
    transition(&mut state, Event::Resize { width, height });

    let result = event_loop(&mut terminal, &mut state, &rx, &workers, &theme);
    stop.store(true, Ordering::SeqCst);
    log::info!("Dashboard closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut DashboardState,
    rx: &Receiver<Event>,
    workers: &Workers,
    theme: &Theme,
) -> Result<()> {
    let mut spinner = crossbeam_channel::never();
    loop {
        draw(terminal, state, theme)?;

        let event = next_event(rx, &mut spinner)?;
        for command in transition(state, event) {
            match command {
                Command::ScheduleSpinnerTick(delay) => spinner = crossbeam_channel::after(delay),
                command => workers.execute(command),
            }
        }

        if state.terminating {
            return Ok(());
        }
    }
}

/// Next queued event, or a spinner tick if the timer fires first. A fired
/// timer is disarmed until rescheduled.
fn next_event(rx: &Receiver<Event>, spinner: &mut Receiver<Instant>) -> Result<Event> {
    let timer: &Receiver<Instant> = spinner;
    let event = crossbeam_channel::select! {
        recv(rx) -> event => event.map_err(|_| GitDashError::ChannelClosed)?,
        recv(timer) -> _ => Event::SpinnerTick,
    };
    if matches!(event, Event::SpinnerTick) {
        *spinner = crossbeam_channel::never();
    }
    Ok(event)
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &DashboardState,
    theme: &Theme,
) -> Result<()> {
    terminal
        .draw(|frame| {
            let screen = compose(state, theme, Utc::now());
            frame.render_widget(Paragraph::new(screen.into_text()), frame.area());
        })
        .map_err(GitDashError::Terminal)?;
    Ok(())
}
