use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use api_types::transaction::TransactionKind;

use crate::{
    app::{EditField, EditPhase, EditTransactionModal},
    dates,
    ui::{
        components::{centered_fixed, hints},
        theme::Theme,
    },
};

const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 15;
const LABEL_WIDTH: usize = 10;

/// Where the modal content sits for a frame of size `area`.
///
/// Rendering and backdrop hit-testing both go through this function.
pub fn modal_area(area: Rect) -> Rect {
    centered_fixed(MODAL_WIDTH, MODAL_HEIGHT, area)
}

/// Dims the whole frame while the edit modal is open.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect, open: bool) {
    if !open {
        return;
    }
    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));
}

pub fn render(frame: &mut Frame<'_>, area: Rect, modal: &EditTransactionModal) {
    let theme = Theme::default();
    let rect = modal_area(area);

    let mut lines = vec![kind_switch(modal.kind(), &theme), Line::from("")];

    if modal.shows_category() {
        let category = modal.draft_category().unwrap_or("Select a category");
        lines.push(field_line(
            "Category",
            vec![Span::raw(format!("‹ {category} ›"))],
            modal.focus() == EditField::Category,
            &theme,
        ));
    }

    lines.push(field_line(
        "Amount",
        input_spans(
            modal.amount_input(),
            &modal.amount_placeholder(),
            modal.focus() == EditField::Amount,
            &theme,
        ),
        modal.focus() == EditField::Amount,
        &theme,
    ));
    lines.push(field_line(
        "Date",
        vec![Span::raw(format!(
            "‹ {} ›",
            dates::format_date(modal.draft_date())
        ))],
        modal.focus() == EditField::Date,
        &theme,
    ));
    lines.push(field_line(
        "Comment",
        input_spans(
            modal.comment_input(),
            modal.comment_placeholder(),
            modal.focus() == EditField::Comment,
            &theme,
        ),
        modal.focus() == EditField::Comment,
        &theme,
    ));

    lines.push(Line::from(""));
    lines.push(buttons(modal.focus(), &theme).alignment(Alignment::Center));
    lines.push(Line::from(""));

    let footer = match modal.phase() {
        EditPhase::Submitting => Line::from(Span::styled(
            "Saving…",
            Style::default().fg(theme.accent),
        )),
        EditPhase::Editing => Line::from(hints::hints_to_spans(hints::EDIT_HINTS, &theme)),
    };
    lines.push(footer.alignment(Alignment::Center));

    let block = Block::default()
        .title(Line::from(" Edit transaction ").alignment(Alignment::Center))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.panel).fg(theme.text));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn kind_switch(kind: TransactionKind, theme: &Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.dim);
    let income = if kind == TransactionKind::Income {
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD)
    } else {
        muted
    };
    let expense = if kind == TransactionKind::Expense {
        Style::default()
            .fg(theme.negative)
            .add_modifier(Modifier::BOLD)
    } else {
        muted
    };

    Line::from(vec![
        Span::styled("Income", income),
        Span::styled(" / ", muted),
        Span::styled("Expense", expense),
    ])
    .alignment(Alignment::Center)
}

fn field_line(
    label: &'static str,
    value: Vec<Span<'static>>,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let marker = if focused { "› " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), label_style),
    ];
    spans.extend(value);
    Line::from(spans)
}

/// Shows the typed value, or the placeholder when nothing has been typed.
fn input_spans(
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let mut spans = if value.is_empty() {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        vec![Span::raw(value.to_string())]
    };
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }
    spans
}

fn buttons(focus: EditField, theme: &Theme) -> Line<'static> {
    let style = |field: EditField| {
        if focus == field {
            Style::default()
                .fg(theme.panel)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent)
        }
    };
    Line::from(vec![
        Span::styled("[ SAVE ]", style(EditField::Save)),
        Span::raw("   "),
        Span::styled("[ CANCEL ]", style(EditField::Cancel)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scroll_lock::ScrollLock, store::TransactionsState};
    use api_types::transaction::Transaction;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf[(x, y)].symbol());
            }
            s.push('\n');
        }
        s
    }

    fn modal_for(kind: TransactionKind) -> EditTransactionModal {
        let mut transactions = TransactionsState::default();
        transactions.replace(vec![Transaction {
            id: "tx-1".to_string(),
            kind,
            category: Some("Car".to_string()),
            amount: 42.5,
            date: "2024-01-03".to_string(),
            comment: "weekly fuel".to_string(),
            owner: "u1".to_string(),
        }]);
        EditTransactionModal::open(&transactions, "tx-1", ScrollLock::new().acquire()).unwrap()
    }

    fn draw(modal: &EditTransactionModal) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), modal))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn expense_shows_category_selector() {
        let output = draw(&modal_for(TransactionKind::Expense));
        assert!(output.contains("Edit transaction"));
        assert!(output.contains("Income / Expense"));
        assert!(output.contains("Category"));
        assert!(output.contains("‹ Car ›"));
    }

    #[test]
    fn income_has_no_category_selector() {
        let output = draw(&modal_for(TransactionKind::Income));
        assert!(!output.contains("Category"));
        assert!(output.contains("Amount"));
    }

    #[test]
    fn placeholders_show_original_values() {
        let output = draw(&modal_for(TransactionKind::Expense));
        assert!(output.contains("42.5"));
        assert!(output.contains("weekly fuel"));
        assert!(output.contains("‹ 01.03.2024 ›"));
    }

    #[test]
    fn typed_amount_replaces_placeholder() {
        let mut modal = modal_for(TransactionKind::Income);
        modal.apply(crate::ui::keymap::ModalAction::Input('7'));
        let output = draw(&modal);
        assert!(!output.contains("42.5"));
        assert!(output.contains("weekly fuel"));
    }

    #[test]
    fn modal_area_is_centred() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = modal_area(area);
        assert_eq!(rect, Rect::new(12, 4, 56, 15));
        assert!(rect.contains(ratatui::layout::Position::new(40, 12)));
        assert!(!rect.contains(ratatui::layout::Position::new(1, 1)));
    }

    #[test]
    fn backdrop_dims_only_when_open() {
        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        terminal
            .draw(|frame| render_backdrop(frame, frame.area(), false))
            .unwrap();
        assert!(
            !terminal.backend().buffer()[(0, 0)]
                .modifier
                .contains(Modifier::DIM)
        );
        terminal
            .draw(|frame| render_backdrop(frame, frame.area(), true))
            .unwrap();
        assert!(
            terminal.backend().buffer()[(0, 0)]
                .modifier
                .contains(Modifier::DIM)
        );
    }
}
