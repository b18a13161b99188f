//! Render composer.
//!
//! Turns a [`DashboardState`] into styled lines. Pure: no I/O, no mutation,
//! and the clock is an argument so output is reproducible.
//!
//! # Layout
//! - header: title, repository path, checked-out branch, inspected branch
//! - body: Branches, Recent Commits, Stash, Project Stats, Working Directory
//! - footer: spinner, key hints, status message

use crate::core::state::{Branch, Commit, RepoSnapshot};
use crate::dashboard::machine::{DashboardState, Focus};
use crate::dashboard::theme::{line_text, Role, Theme};
use chrono::{DateTime, Utc};
use ratatui::text::{Line, Span, Text};

pub const MAX_MESSAGE_CHARS: usize = 50;
pub const MAX_LISTED_FILES: usize = 10;
pub const TOP_LANGUAGES: usize = 5;
const HELP_WIDTH: usize = 50;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("q / Esc", "Quit"),
    ("r", "Refresh everything"),
    ("? or /", "Toggle this help"),
    ("Tab", "Focus the branch list"),
    ("↑/↓ j/k", "Select branch / scroll"),
    ("PgUp/PgDn", "Scroll one page"),
    ("g / G", "Scroll to top / bottom"),
    ("Enter", "Checkout selected branch"),
    ("f", "Force checkout (discard changes)"),
];

/// A composed frame, already cut to the visible body window.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub header: Vec<Line<'static>>,
    pub body: Vec<Line<'static>>,
    pub footer: Vec<Line<'static>>,
}

impl Screen {
    pub fn into_text(self) -> Text<'static> {
        let mut lines = self.header;
        lines.extend(self.body);
        lines.extend(self.footer);
        Text::from(lines)
    }

    /// Unstyled rendering, one terminal row per line.
    pub fn plain_text(&self) -> String {
        self.header
            .iter()
            .chain(&self.body)
            .chain(&self.footer)
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn compose(state: &DashboardState, theme: &Theme, now: DateTime<Utc>) -> Screen {
    let viewport = state.viewport_height();
    let body = compose_body(state, theme, now);
    let scroll = if state.show_help {
        0
    } else {
        state.scroll.min(body.len().saturating_sub(viewport))
    };

    Screen {
        header: header(state, theme),
        body: body.into_iter().skip(scroll).take(viewport).collect(),
        footer: footer(state, theme),
    }
}

/// Rows the full body occupies before scrolling is applied.
pub fn body_line_count(state: &DashboardState) -> usize {
    compose_body(state, &Theme::plain(), DateTime::<Utc>::UNIX_EPOCH).len()
}

fn compose_body(state: &DashboardState, theme: &Theme, now: DateTime<Utc>) -> Vec<Line<'static>> {
    if state.show_help {
        return help_overlay(state, theme);
    }

    let width = state.panel_width;
    let snapshot = &state.snapshot;
    let mut body = Vec::new();
    body.extend(theme.panel(
        &format!("Branches ({})", snapshot.branches.len()),
        branch_rows(state, theme, now),
        width,
        state.focus == Focus::Branches,
    ));

    let commits_title = if state.inspected_branch.is_empty() {
        "Recent Commits".to_string()
    } else {
        format!("Recent Commits ({})", state.inspected_branch)
    };
    body.extend(theme.panel(&commits_title, commit_rows(snapshot, theme, now), width, false));
    body.extend(theme.panel("Stash", stash_rows(snapshot, theme, now), width, false));
    body.extend(theme.panel("Project Stats", stats_rows(snapshot, theme, width), width, false));
    body.extend(theme.panel("Working Directory", workdir_rows(snapshot, theme), width, false));
    body
}

fn header(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let info = &state.snapshot.info;
    let sep = format!(" {} ", theme.separator());
    let branch = if info.current_branch.is_empty() {
        "(empty repository)".to_string()
    } else {
        info.current_branch.clone()
    };

    let mut title = vec![
        theme.span(" GitDash ", Role::Title),
        theme.span(sep.clone(), Role::Dim),
        theme.span(info.path.display().to_string(), Role::Normal),
        theme.span(sep.clone(), Role::Dim),
        theme.span(branch, Role::Current),
    ];
    if state.is_inspecting_other_branch() {
        title.push(theme.span(sep.clone(), Role::Dim));
        title.push(theme.span(format!("inspecting {}", state.inspected_branch), Role::Header));
    }

    let remotes = if info.remotes.is_empty() {
        "no remotes".to_string()
    } else {
        info.remotes.join(", ")
    };
    let cleanliness = if info.is_clean { "clean" } else { "dirty" };
    let summary = theme.span(format!(" {remotes}{sep}{cleanliness}"), Role::Dim);

    vec![Line::from(title), Line::from(summary), Line::default()]
}

fn footer(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let sep = format!(" {} ", theme.separator());
    let mut spans = Vec::new();
    if state.loading {
        spans.push(theme.span(format!("{} ", theme.spinner(state.spinner)), Role::Header));
    }

    let mut hints = "q quit, r refresh, ? help, Tab focus".to_string();
    if state.focus == Focus::Branches {
        hints.push_str(&sep);
        hints.push_str("↑/↓ select, Enter checkout, f force");
    } else {
        hints.push_str(&sep);
        hints.push_str("↑/↓ scroll");
    }
    spans.push(theme.span(hints, Role::Dim));

    if !state.status_message.is_empty() {
        spans.push(theme.span(sep, Role::Dim));
        let role = if state.status_message.starts_with("Error") {
            Role::Error
        } else {
            Role::Normal
        };
        spans.push(theme.span(state.status_message.clone(), role));
    }

    vec![Line::default(), Line::from(spans)]
}

fn branch_rows(state: &DashboardState, theme: &Theme, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let branches = &state.snapshot.branches;
    if branches.is_empty() {
        return vec![Line::from(theme.span("  No branches", Role::Dim))];
    }

    let focused = state.focus == Focus::Branches;
    branches
        .iter()
        .enumerate()
        .map(|(index, branch)| {
            let is_cursor = focused && index == state.selected;
            branch_row(state, theme, branch, is_cursor, now)
        })
        .collect()
}

fn branch_row(
    state: &DashboardState,
    theme: &Theme,
    branch: &Branch,
    is_cursor: bool,
    now: DateTime<Utc>,
) -> Line<'static> {
    let spinner = if state.loading && state.checking_out == branch.name {
        format!("{} ", theme.spinner(state.spinner))
    } else {
        String::new()
    };
    let cursor = if is_cursor { theme.cursor_marker() } else { " " };
    let current = if branch.is_current {
        theme.current_marker()
    } else {
        " "
    };

    let name_role = if is_cursor {
        Role::Cursor
    } else if branch.is_current {
        Role::Current
    } else {
        Role::Normal
    };

    let mut spans = vec![
        theme.span(format!(" {spinner}{cursor}"), Role::Header),
        theme.span(current, Role::Current),
        Span::raw(" "),
        theme.span(branch.name.clone(), name_role),
    ];
    if let Some(when) = branch.last_commit {
        spans.push(theme.span(format!(" ({})", relative_time(when, now)), Role::Dim));
    }
    Line::from(spans)
}

fn commit_rows(snapshot: &RepoSnapshot, theme: &Theme, now: DateTime<Utc>) -> Vec<Line<'static>> {
    if snapshot.commits.is_empty() {
        return vec![Line::from(theme.span("  No commits found", Role::Dim))];
    }

    snapshot
        .commits
        .iter()
        .flat_map(|commit| commit_lines(commit, theme, now))
        .collect()
}

fn commit_lines(commit: &Commit, theme: &Theme, now: DateTime<Utc>) -> [Line<'static>; 2] {
    let first = Line::from(vec![
        Span::raw(" "),
        theme.span(commit.short_hash().to_string(), Role::Hash),
        Span::raw(" "),
        theme.span(truncate_message(commit.summary()), Role::Normal),
    ]);

    let when = if theme.show_relative_time {
        relative_time(commit.when, now)
    } else {
        commit.when.format("%Y-%m-%d %H:%M").to_string()
    };
    let detail = if theme.show_author {
        format!("{}, {when}", commit.author)
    } else {
        when
    };
    let second = Line::from(theme.span(format!("         {detail}"), Role::Dim));

    [first, second]
}

fn stash_rows(snapshot: &RepoSnapshot, theme: &Theme, now: DateTime<Utc>) -> Vec<Line<'static>> {
    if snapshot.stash.is_empty() {
        return vec![Line::from(theme.span("  No stash entries", Role::Dim))];
    }

    snapshot
        .stash
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::raw(" "),
                theme.span(format!("stash@{{{}}}", entry.id), Role::Current),
                Span::raw(" "),
                theme.span(entry.message.clone(), Role::Normal),
            ];
            if let Some(when) = entry.timestamp {
                spans.push(theme.span(format!(" ({})", relative_time(when, now)), Role::Dim));
            }
            Line::from(spans)
        })
        .collect()
}

fn stats_rows(snapshot: &RepoSnapshot, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let stats = &snapshot.languages;
    if stats.total_files == 0 && stats.languages.is_empty() {
        return vec![Line::from(theme.span("  No stats available", Role::Dim))];
    }

    // name, percentage and padding take 21 columns inside the border
    let max_bar = width.saturating_sub(2 + 21).min(50);
    let mut rows = vec![
        Line::from(format!(" Total Files: {}", stats.total_files)),
        Line::default(),
    ];

    for language in stats.languages.iter().take(TOP_LANGUAGES) {
        let cells = ((language.percentage / 100.0) * max_bar as f64).round() as usize;
        rows.push(Line::from(vec![
            Span::raw(format!(" {:<10} {:>5.1}% ", language.name, language.percentage)),
            theme.span(theme.bar(cells), Role::Bar),
        ]));
    }

    if !stats.branch.is_empty() {
        rows.push(Line::default());
        rows.push(Line::from(theme.span(format!(" Branch: {}", stats.branch), Role::Dim)));
    }
    rows
}

fn workdir_rows(snapshot: &RepoSnapshot, theme: &Theme) -> Vec<Line<'static>> {
    let status = &snapshot.status;
    if status.is_clean() {
        return vec![Line::from(theme.span("  Working directory clean", Role::Dim))];
    }

    let mut rows = Vec::new();
    let counts = [
        ("Modified", status.modified),
        ("Staged", status.staged),
        ("Untracked", status.untracked),
        ("Conflicted", status.conflicted),
    ];
    for (label, count) in counts.into_iter().filter(|(_, count)| *count > 0) {
        rows.push(Line::from(format!(" {label}: {count}")));
    }
    rows.push(Line::default());

    for file in status.files.iter().take(MAX_LISTED_FILES) {
        let stage = if file.staged { "+" } else { " " };
        rows.push(Line::from(vec![
            Span::raw(" "),
            theme.span(format!("{}{stage}", file.status.as_str()), Role::Status(file.status)),
            Span::raw(" "),
            theme.span(file.path.display().to_string(), Role::Status(file.status)),
        ]));
    }

    if status.files.len() > MAX_LISTED_FILES {
        rows.push(Line::from(theme.span(
            format!(" ... and {} more", status.files.len() - MAX_LISTED_FILES),
            Role::Dim,
        )));
    }
    rows
}

fn help_overlay(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows = vec![Line::default()];
    for (key, description) in KEY_BINDINGS {
        rows.push(Line::from(vec![
            theme.span(format!("  {key:<12}"), Role::Header),
            theme.span(*description, Role::Normal),
        ]));
    }
    rows.push(Line::default());
    rows.push(Line::from(theme.span(
        format!("  gitdash v{}", env!("CARGO_PKG_VERSION")),
        Role::Dim,
    )));

    let boxed = theme.panel("Help & Controls", rows, HELP_WIDTH, true);
    let left = usize::from(state.width).saturating_sub(HELP_WIDTH) / 2;
    let top = state.viewport_height().saturating_sub(boxed.len()) / 2;

    let mut lines = vec![Line::default(); top];
    lines.extend(boxed.into_iter().map(|line| {
        let mut spans = vec![Span::raw(" ".repeat(left))];
        spans.extend(line.spans);
        Line::from(spans)
    }));
    lines
}

/// First line of a commit message, cut to fit the commit panel.
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }
    let kept: String = message.chars().take(MAX_MESSAGE_CHARS - 3).collect();
    format!("{kept}...")
}

/// Coarse human-readable age, e.g. `3 hours ago`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 1 {
        return "now".to_string();
    }

    let (count, unit) = match seconds {
        s if s < 60 => (s, "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 7 * 86_400 => (s / 86_400, "day"),
        s if s < 30 * 86_400 => (s / (7 * 86_400), "week"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::git_status::GitStatus;
    use crate::core::state::{FileStatus, LanguageStat, LanguageStats, RepoInfo, StashEntry};
    use crate::dashboard::event::{Event, KeyAction};
    use crate::dashboard::machine::transition;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn branch(name: &str, is_current: bool) -> Branch {
        Branch {
            name: name.to_string(),
            is_current,
            last_commit: Some(now() - Duration::hours(2)),
            hash: "f".repeat(40),
        }
    }

    fn sample_snapshot() -> RepoSnapshot {
        RepoSnapshot {
            info: RepoInfo {
                path: "/work/project".into(),
                current_branch: "main".to_string(),
                is_clean: true,
                remotes: vec!["origin".to_string()],
            },
            branches: vec![branch("main", true), branch("dev", false)],
            commits: vec![Commit {
                hash: "a7f3d92000000000000000000000000000000000".to_string(),
                message: "feat: add stats panel\n\nbody".to_string(),
                author: "John Doe".to_string(),
                when: now() - Duration::hours(2),
            }],
            languages: LanguageStats {
                branch: "main".to_string(),
                total_files: 4,
                languages: vec![
                    LanguageStat {
                        name: "Rust".to_string(),
                        files: 3,
                        percentage: 75.0,
                    },
                    LanguageStat {
                        name: "Markdown".to_string(),
                        files: 1,
                        percentage: 25.0,
                    },
                ],
            },
            ..Default::default()
        }
    }

    fn state() -> DashboardState {
        DashboardState::new(sample_snapshot(), 100, 60)
    }

    fn render(state: &DashboardState) -> String {
        compose(state, &Theme::plain(), now()).plain_text()
    }

    #[test]
    fn test_header_shows_path_and_branch() {
        let text = render(&state());
        let first = text.lines().next().unwrap();
        assert!(first.contains("GitDash"));
        assert!(first.contains("/work/project"));
        assert!(first.contains("main"));
        assert!(!first.contains("inspecting"));
    }

    #[test]
    fn test_header_shows_inspected_branch_only_when_different() {
        let mut state = state();
        state.inspected_branch = "dev".to_string();
        let text = render(&state);
        assert!(text.lines().next().unwrap().contains("inspecting dev"));
    }

    #[test]
    fn test_empty_repository_label() {
        let mut snapshot = sample_snapshot();
        snapshot.info.current_branch.clear();
        snapshot.branches.clear();
        snapshot.commits.clear();
        let text = render(&DashboardState::new(snapshot, 100, 60));
        assert!(text.contains("(empty repository)"));
        assert!(text.contains("No commits found"));
        assert!(text.contains("No branches"));
    }

    #[test]
    fn test_branch_rows_mark_current_and_cursor() {
        let mut state = state();
        let text = render(&state);
        assert!(text.contains("  * main (2 hours ago)"));
        assert!(!text.contains(">"));

        transition(&mut state, Event::Key(KeyAction::ToggleFocus));
        let text = render(&state);
        assert!(text.contains(" >* main"));
        assert!(text.contains("↑/↓ select, Enter checkout"));
    }

    #[test]
    fn test_spinner_only_next_to_branch_mid_checkout() {
        let mut state = state();
        transition(&mut state, Event::Key(KeyAction::ToggleFocus));
        transition(&mut state, Event::Key(KeyAction::Down));
        transition(&mut state, Event::Key(KeyAction::Checkout { force: false }));
        state.spinner = 2;

        let text = render(&state);
        assert!(text.contains(" - >  dev"));
        assert!(!text.contains(" - >* main"));
        assert!(text.lines().last().unwrap().starts_with("- "));
    }

    #[test]
    fn test_commit_rows() {
        let text = render(&state());
        assert!(text.contains(" a7f3d92 feat: add stats panel"));
        assert!(text.contains("John Doe, 2 hours ago"));
        assert!(!text.contains("body"));
    }

    #[test]
    fn test_commit_rows_respect_display_options() {
        let mut theme = Theme::plain();
        theme.show_author = false;
        theme.show_relative_time = false;
        let text = compose(&state(), &theme, now()).plain_text();
        assert!(!text.contains("John Doe"));
        assert!(text.contains("2024-06-01 10:00"));
    }

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short"), "short");
        let long = "x".repeat(60);
        let cut = truncate_message(&long);
        assert_eq!(cut.chars().count(), MAX_MESSAGE_CHARS);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_message(&"y".repeat(50)), "y".repeat(50));
    }

    #[test]
    fn test_stash_and_stats_panels() {
        let mut snapshot = sample_snapshot();
        snapshot.stash.push(StashEntry {
            id: 0,
            message: "WIP on main: tweak".to_string(),
            timestamp: Some(now() - Duration::days(3)),
            hash: "b".repeat(40),
        });
        let text = render(&DashboardState::new(snapshot, 100, 60));
        assert!(text.contains("stash@{0} WIP on main: tweak (3 days ago)"));
        assert!(text.contains("Total Files: 4"));
        assert!(text.contains(" Rust        75.0% #"));
        assert!(text.contains("Branch: main"));
    }

    #[test]
    fn test_stats_show_only_top_five_languages() {
        let mut snapshot = sample_snapshot();
        snapshot.languages.languages = (0..7)
            .map(|i| LanguageStat {
                name: format!("Lang{i}"),
                files: 1,
                percentage: 100.0 / 7.0,
            })
            .collect();
        let text = render(&DashboardState::new(snapshot, 100, 80));
        assert!(text.contains("Lang4"));
        assert!(!text.contains("Lang5"));
    }

    #[test]
    fn test_workdir_clean_and_overflow() {
        assert!(render(&state()).contains("Working directory clean"));

        let mut snapshot = sample_snapshot();
        snapshot.status.files = (0..12)
            .map(|i| FileStatus {
                path: format!("file{i:02}.rs").into(),
                status: GitStatus::Modified,
                staged: false,
            })
            .collect();
        snapshot.status.modified = 12;
        let text = render(&DashboardState::new(snapshot, 100, 80));
        assert!(text.contains("Modified: 12"));
        assert!(text.contains("M  file09.rs"));
        assert!(!text.contains("file10.rs"));
        assert!(text.contains("... and 2 more"));
    }

    #[test]
    fn test_footer_shows_status_message() {
        let mut state = state();
        state.status_message = "Error: boom".to_string();
        let text = render(&state);
        assert!(text.lines().last().unwrap().ends_with("Error: boom"));
    }

    #[test]
    fn test_help_overlay_lists_bindings() {
        let mut state = state();
        transition(&mut state, Event::Key(KeyAction::ToggleHelp));
        let text = render(&state);
        assert!(text.contains("Help & Controls"));
        assert!(text.contains("Force checkout"));
        assert!(!text.contains("Recent Commits"));
    }

    #[test]
    fn test_body_is_cut_to_viewport() {
        let mut state = DashboardState::new(sample_snapshot(), 100, 10);
        let screen = compose(&state, &Theme::plain(), now());
        assert_eq!(screen.header.len(), 3);
        assert_eq!(screen.footer.len(), 2);
        assert_eq!(screen.body.len(), 5);

        state.scroll = 1;
        let scrolled = compose(&state, &Theme::plain(), now());
        assert_eq!(line_text(&scrolled.body[0]), line_text(&screen.body[1]));
    }

    #[test]
    fn test_panels_use_panel_width() {
        let state = state();
        let screen = compose(&state, &Theme::plain(), now());
        for line in &screen.body {
            assert_eq!(line_text(line).chars().count(), state.panel_width);
        }
    }

    #[test]
    fn test_relative_time() {
        let now = now();
        assert_eq!(relative_time(now, now), "now");
        assert_eq!(relative_time(now + Duration::hours(1), now), "now");
        assert_eq!(relative_time(now - Duration::seconds(30), now), "30 seconds ago");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_time(now - Duration::days(1), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::days(14), now), "2 weeks ago");
        assert_eq!(relative_time(now - Duration::days(90), now), "3 months ago");
        assert_eq!(relative_time(now - Duration::days(800), now), "2 years ago");
    }
}
