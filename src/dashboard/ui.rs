use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use super::app::{DashboardApp, FormField, InputMode};
use super::widgets;

pub fn render(frame: &mut Frame, app: &mut DashboardApp) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(size);

    let title = widgets::render_title(app.controller.state().show_rejected());
    frame.render_widget(title, chunks[0]);

    render_form(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_log_panel(frame, app, chunks[3]);

    let help = widgets::render_help(app.input_mode == InputMode::Form);
    frame.render_widget(help, chunks[4]);
}

fn render_form(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let field_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(area);

    let form = &app.controller.state().form;
    let fields = [
        (FormField::Id, &form.id),
        (FormField::FirstName, &form.first_name),
        (FormField::LastName, &form.last_name),
    ];

    for ((field, input), chunk) in fields.into_iter().zip(field_chunks.iter()) {
        // Borders take one column on each side
        let width = chunk.width.saturating_sub(2) as usize;
        let focused = app.input_mode == InputMode::Form && app.focused_field == field;

        let widget = widgets::render_form_field(field.label(), input, width, focused);
        frame.render_widget(widget, *chunk);

        if focused {
            let scroll = input.visual_scroll(width);
            let cursor = input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor_position((chunk.x + 1 + cursor, chunk.y + 1));
        }
    }
}

fn render_table(frame: &mut Frame, app: &mut DashboardApp, area: Rect) {
    let rows = app.rows();
    let table = widgets::render_applications_table(&rows);
    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_log_panel(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let log_entries: Vec<_> = match app.log_buffer.lock() {
        Ok(logs) => logs.iter().cloned().collect(),
        Err(_) => Vec::new(),
    };

    // Borders take one row above and one below
    let rows = area.height.saturating_sub(2) as usize;
    let log_panel = widgets::render_log_panel(&log_entries, app.log_scroll, rows);
    frame.render_widget(log_panel, area);
}
