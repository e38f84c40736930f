use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table};
use tui_input::Input;

use super::app::LogEntry;
use super::view::{self, RowAction, RowView};

pub fn render_title(show_rejected: bool) -> Paragraph<'static> {
    let toggle_color = if show_rejected {
        Color::Yellow
    } else {
        Color::Green
    };

    let text = Line::from(vec![
        Span::styled(
            view::TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("[t] ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            view::toggle_label(show_rejected),
            Style::default()
                .fg(toggle_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    Paragraph::new(text).block(Block::default().borders(Borders::ALL))
}

pub fn render_form_field<'a>(
    label: &'a str,
    input: &'a Input,
    width: usize,
    focused: bool,
) -> Paragraph<'a> {
    let scroll = input.visual_scroll(width);
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(label))
}

pub fn render_applications_table(rows: &[RowView]) -> Table<'static> {
    let header = Row::new(view::COLUMN_HEADERS.map(Cell::from)).style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let action_color = match row.action {
                RowAction::Reject => Color::Red,
                RowAction::Hide => Color::Blue,
            };
            let [id, state, name, submitted, action] = row.cells();
            Row::new(vec![
                Cell::from(id),
                Cell::from(state),
                Cell::from(name),
                Cell::from(submitted),
                Cell::from(action).style(Style::default().fg(action_color)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(28),
        Constraint::Length(8),
    ];

    Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Applications ({})", rows.len())),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ")
}

pub fn render_help(form_focused: bool) -> Paragraph<'static> {
    let text = if form_focused {
        "Tab/Shift-Tab: next field   Enter: submit application   Esc: back to table"
    } else {
        "↑/↓: select   Enter: row action   r: reject   h: hide   \
         t: toggle rejected   n: new   q: quit"
    };
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
}

/// `scroll` counts entries back from the newest one; 0 follows the tail
pub fn render_log_panel(logs: &[LogEntry], scroll: usize, rows: usize) -> List<'static> {
    // Scrolling past the oldest entry keeps the first page on screen
    let end = logs.len().saturating_sub(scroll).max(rows.min(logs.len()));
    let start = end.saturating_sub(rows);

    let items: Vec<ListItem> = logs[start..end]
        .iter()
        .map(|entry| {
            let level_color = match entry.level {
                tracing::Level::ERROR => Color::Red,
                tracing::Level::WARN => Color::Yellow,
                tracing::Level::INFO => Color::Green,
                tracing::Level::DEBUG => Color::Blue,
                tracing::Level::TRACE => Color::Gray,
            };

            let content = Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:5} ", entry.level),
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.message.clone()),
            ]);

            ListItem::new(content)
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Logs (PgUp/PgDn to scroll, End to follow)"),
    )
}
