//! Terminal input decoding.

use crate::dashboard::event::{Event, KeyAction};
use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a dashboard action. Releases and unbound keys yield
/// `None`.
pub fn key_action(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyAction::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Char('?') | KeyCode::Char('/') => KeyAction::ToggleHelp,
        KeyCode::Tab => KeyAction::ToggleFocus,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::Home | KeyCode::Char('g') => KeyAction::Top,
        KeyCode::End | KeyCode::Char('G') => KeyAction::Bottom,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Enter => KeyAction::Checkout { force: false },
        KeyCode::Char('f') => KeyAction::Checkout { force: true },
        _ => return None,
    };
    Some(action)
}

/// Translate a raw terminal event into a dashboard event.
pub fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) => key_action(key).map(Event::Key),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
