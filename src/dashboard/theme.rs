//! Explicit styling passed into the render composer.
//!
//! A [`Theme`] decides colors and glyphs. Nothing here is global: tests can
//! render the same state with a plain ASCII theme and compare text.

use crate::core::config::DashboardConfig;
use crate::core::git_status::GitStatus;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What a piece of text means, independent of how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Header,
    Normal,
    Dim,
    Current,
    Cursor,
    Hash,
    Border,
    FocusedBorder,
    Bar,
    Error,
    Status(GitStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyphs {
    spinner: [&'static str; 4],
    current: &'static str,
    cursor: &'static str,
    bar: &'static str,
    separator: &'static str,
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    horizontal: &'static str,
    vertical: &'static str,
}

const UNICODE_GLYPHS: Glyphs = Glyphs {
    spinner: ["⠋", "⠙", "⠹", "⠸"],
    current: "●",
    cursor: ">",
    bar: "█",
    separator: "•",
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal: "─",
    vertical: "│",
};

const ASCII_GLYPHS: Glyphs = Glyphs {
    spinner: ["|", "/", "-", "\\"],
    current: "*",
    cursor: ">",
    bar: "#",
    separator: "-",
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "-",
    vertical: "|",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colors: bool,
    glyphs: Glyphs,
    pub show_author: bool,
    pub show_relative_time: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Theme {
    pub fn new(colors: bool, unicode: bool) -> Self {
        Self {
            colors,
            glyphs: if unicode { UNICODE_GLYPHS } else { ASCII_GLYPHS },
            show_author: true,
            show_relative_time: true,
        }
    }

    /// Monochrome ASCII, used for text assertions and dumb terminals.
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            show_author: config.commits.show_author,
            show_relative_time: config.commits.show_relative_time,
            ..Self::new(config.display.colors, config.display.unicode)
        }
    }

    pub fn style(&self, role: Role) -> Style {
        if !self.colors {
            return match role {
                Role::Title | Role::Header | Role::Current => {
                    Style::default().add_modifier(Modifier::BOLD)
                }
                Role::Cursor => Style::default().add_modifier(Modifier::REVERSED),
                _ => Style::default(),
            };
        }

        let base = Style::default();
        match role {
            Role::Title => base
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            Role::Header => base.fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Role::Normal => base,
            Role::Dim => base.fg(Color::DarkGray),
            Role::Current => base.fg(Color::Green).add_modifier(Modifier::BOLD),
            Role::Cursor => base
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Role::Hash => base.fg(Color::Magenta),
            Role::Border => base.fg(Color::Blue),
            Role::FocusedBorder => base.fg(Color::Magenta).add_modifier(Modifier::BOLD),
            Role::Bar => base.fg(Color::Cyan),
            Role::Error => base.fg(Color::Red).add_modifier(Modifier::BOLD),
            Role::Status(status) => match status {
                GitStatus::Modified => base.fg(Color::Yellow),
                GitStatus::Added => base.fg(Color::Green),
                GitStatus::Deleted => base.fg(Color::Red),
                GitStatus::Renamed => base.fg(Color::Blue),
                GitStatus::TypeChanged => base.fg(Color::Magenta),
                GitStatus::Untracked => base.fg(Color::Cyan),
                GitStatus::Unmerged => base.fg(Color::Red).add_modifier(Modifier::BOLD),
            },
        }
    }

    pub fn span(&self, text: impl Into<String>, role: Role) -> Span<'static> {
        Span::styled(text.into(), self.style(role))
    }

    pub fn spinner(&self, phase: usize) -> &'static str {
        self.glyphs.spinner[phase % self.glyphs.spinner.len()]
    }

    pub fn current_marker(&self) -> &'static str {
        self.glyphs.current
    }

    pub fn cursor_marker(&self) -> &'static str {
        self.glyphs.cursor
    }

    pub fn bar(&self, cells: usize) -> String {
        self.glyphs.bar.repeat(cells)
    }

    pub fn separator(&self) -> &'static str {
        self.glyphs.separator
    }

    /// Frame `content` in a bordered box `width` columns wide, title inset in
    /// the top edge. Content wider than the box is cut at the border.
    pub fn panel(
        &self,
        title: &str,
        content: Vec<Line<'static>>,
        width: usize,
        focused: bool,
    ) -> Vec<Line<'static>> {
        let g = &self.glyphs;
        let border = self.style(if focused {
            Role::FocusedBorder
        } else {
            Role::Border
        });
        let inner = width.saturating_sub(2);

        let (label, label_width) = take_columns(&format!(" {title} "), inner.saturating_sub(1));
        let fill = inner.saturating_sub(label_width + 1);

        let mut lines = Vec::with_capacity(content.len() + 2);
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", g.top_left, g.horizontal), border),
            Span::styled(label, self.style(Role::Header)),
            Span::styled(
                format!("{}{}", g.horizontal.repeat(fill), g.top_right),
                border,
            ),
        ]));

        for line in content {
            let mut spans = vec![Span::styled(g.vertical, border)];
            let (mut fitted, used) = fit_spans(line.spans, inner);
            spans.append(&mut fitted);
            if used < inner {
                spans.push(Span::raw(" ".repeat(inner - used)));
            }
            spans.push(Span::styled(g.vertical, border));
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{}",
                g.bottom_left,
                g.horizontal.repeat(inner),
                g.bottom_right
            ),
            border,
        )));
        lines
    }
}

/// Longest prefix of `text` that fits in `max` terminal columns, and its
/// width. A wide character that would straddle the limit is left out.
fn take_columns(text: &str, max: usize) -> (String, usize) {
    let mut used = 0;
    let mut kept = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > max {
            break;
        }
        used += width;
        kept.push(ch);
    }
    (kept, used)
}

/// Keep at most `max` columns of `spans`, returning the kept spans and the
/// columns they occupy.
fn fit_spans(spans: Vec<Span<'static>>, max: usize) -> (Vec<Span<'static>>, usize) {
    let mut used = 0;
    let mut kept = Vec::with_capacity(spans.len());

    for span in spans {
        let width = span.content.width();
        if used + width <= max {
            used += width;
            kept.push(span);
            continue;
        }
        let (cut, cut_width) = take_columns(&span.content, max - used);
        if !cut.is_empty() {
            kept.push(Span::styled(cut, span.style));
            used += cut_width;
        }
        break;
    }

    (kept, used)
}

/// Plain text of a line, styles dropped.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
