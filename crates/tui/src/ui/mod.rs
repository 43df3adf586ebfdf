pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    screens::transactions::render(frame, layout[0], state);
    render_bottom_bar(frame, layout[1], &theme);

    let open = state.ui.is_modal_edit_transaction_open();
    screens::edit_transaction::render_backdrop(frame, area, open);
    if let (true, Some(modal)) = (open, state.edit_modal.as_ref()) {
        screens::edit_transaction::render(frame, area, modal);
    }

    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let hints = components::hints::hints_to_spans(components::hints::LIST_HINTS, theme);
    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
