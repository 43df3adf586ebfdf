use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::transaction::{Transaction, TransactionKind};

use crate::{
    app::AppState,
    dates,
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("User", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", state.session.user.id)),
        Span::styled("Items", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.transactions.items.len())),
    ];

    if let Some(err) = &state.transactions.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("Transactions");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .transactions
        .items
        .iter()
        .map(|tx| ListItem::new(row(tx, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.transactions.selected));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row(tx: &Transaction, theme: &Theme) -> Line<'static> {
    let date = dates::parse_transaction_date(&tx.date)
        .map(dates::format_payload_date)
        .unwrap_or_else(|_| tx.date.clone());
    let (sign, color) = match tx.kind {
        TransactionKind::Income => ("+", theme.positive),
        TransactionKind::Expense => ("-", theme.negative),
    };
    let category = tx.category.as_deref().unwrap_or("-");

    Line::from(vec![
        Span::raw(format!("{date}  ")),
        Span::styled(
            format!("{sign} {:<12}", format!("{:.2}", tx.amount)),
            Style::default().fg(color),
        ),
        Span::raw(format!("{category:<20} ")),
        Span::styled(tx.comment.clone(), Style::default().fg(theme.dim)),
    ])
}
