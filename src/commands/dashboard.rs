use crate::core::{
    config::DashboardConfig,
    error::Result,
    git::{find_repository_root, GitRepo},
    output::print_warning,
    state::RepoSnapshot,
};
use crate::dashboard::{
    machine::DashboardState, runtime, RefreshMode, SnapshotAssembler, Theme,
};
use std::path::Path;
use std::time::Duration;

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Everything the interactive loop needs, assembled before the terminal is
/// taken over so fatal errors still print normally.
pub struct DashboardSetup {
    pub state: DashboardState,
    pub assembler: SnapshotAssembler,
    pub config: DashboardConfig,
}

/// Locate and open the repository, load configuration and assemble the
/// first full snapshot for the checked-out branch.
pub fn prepare_dashboard(path: &Path, config_path: Option<&Path>) -> Result<DashboardSetup> {
    let root = find_repository_root(path)?;

    let (config, problem) = DashboardConfig::load(config_path);
    if let Some(problem) = problem {
        log::warn!("{problem}");
        print_warning(&format!("{problem}; using defaults"));
    }

    let current_branch = GitRepo::open(&root)?.current_branch();
    log::info!(
        "Starting dashboard for {} on '{current_branch}'",
        root.display()
    );

    let assembler = SnapshotAssembler::new(&root, config.commits.show_count);
    let snapshot = assembler.assemble(&current_branch, &RefreshMode::Full)?;

    let (width, height) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);
    Ok(DashboardSetup {
        state: DashboardState::new(snapshot, width, height),
        assembler,
        config,
    })
}

pub fn execute_dashboard(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let DashboardSetup {
        state,
        assembler,
        config,
    } = prepare_dashboard(path, config_path)?;

    let settle = Duration::from_millis(config.checkout.settle_delay_ms);
    runtime::run(state, assembler, settle, Theme::from_config(&config))
}

/// Print the initial snapshot as JSON instead of starting the dashboard.
pub fn execute_snapshot_dump(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let setup = prepare_dashboard(path, config_path)?;
    println!("{}", snapshot_json(&setup.state.snapshot)?);
    Ok(())
}

pub fn snapshot_json(snapshot: &RepoSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
