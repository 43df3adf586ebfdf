use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub const LIST_HINTS: &[KeyHint] = &[
    KeyHint::new("↑↓", "select"),
    KeyHint::new("e", "edit"),
    KeyHint::new("r", "refresh"),
    KeyHint::new("q", "quit"),
];

pub const EDIT_HINTS: &[KeyHint] = &[
    KeyHint::new("Tab", "next"),
    KeyHint::new("↑↓←→", "change"),
    KeyHint::new("Enter", "save"),
    KeyHint::new("Esc", "close"),
];

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}
