// Presentation model: state in, rows and labels out

use crate::models::RecordId;

use super::state::DashboardState;

pub const TITLE: &str = "Applications Dashboard";

pub const COLUMN_HEADERS: [&str; 5] = [
    "Application ID",
    "Application State",
    "Candidate Name",
    "Submitted",
    "Action",
];

/// What the action column offers for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Reject,
    Hide,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Reject => "Reject",
            RowAction::Hide => "Hide",
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub state: String,
    pub candidate_name: String,
    pub submitted: String,
    pub action: RowAction,
}

impl RowView {
    pub fn cells(&self) -> [String; 5] {
        [
            self.id.to_string(),
            self.state.clone(),
            self.candidate_name.clone(),
            self.submitted.clone(),
            self.action.label().to_string(),
        ]
    }
}

/// Visible applications as table rows, in list order
pub fn rows(state: &DashboardState) -> Vec<RowView> {
    state
        .visible()
        .map(|app| RowView {
            id: app.id.clone(),
            state: app.application_state.to_string(),
            candidate_name: app.candidate.display_name(),
            submitted: app.updated_on.clone().unwrap_or_default(),
            action: if app.is_rejected() {
                RowAction::Hide
            } else {
                RowAction::Reject
            },
        })
        .collect()
}

/// Label of the toggle: names what pressing it will do
pub fn toggle_label(show_rejected: bool) -> &'static str {
    if show_rejected {
        "Hide Rejected"
    } else {
        "Show Rejected"
    }
}

/// Plain-text table used by snapshot mode
pub fn render_text_table(rows: &[RowView]) -> String {
    let mut widths: [usize; 5] = COLUMN_HEADERS.map(|h| h.chars().count());
    let cells: Vec<[String; 5]> = rows.iter().map(RowView::cells).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |values: &[String]| -> String {
        values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&COLUMN_HEADERS.map(String::from)));
    out.push('\n');
    for row in &cells {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}
