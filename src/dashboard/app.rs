use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ratatui::widgets::TableState;
use tokio::sync::watch;
use tui_input::Input;

use crate::models::RecordId;

use super::controller::DashboardController;
use super::view::{self, RowAction, RowView};

/// Log entry for dashboard display
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: tracing::Level,
    pub message: String,
}

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Form,
}

/// Form field that currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    FirstName,
    LastName,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Id => FormField::FirstName,
            FormField::FirstName => FormField::LastName,
            FormField::LastName => FormField::Id,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Id => FormField::LastName,
            FormField::FirstName => FormField::Id,
            FormField::LastName => FormField::FirstName,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
        }
    }
}

/// User intent that needs the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reject(RecordId),
    Hide(RecordId),
    ToggleRejected,
    Submit,
}

/// Terminal application state: the controller plus everything only the TUI cares about
pub struct DashboardApp {
    pub controller: DashboardController,
    /// Log buffer for display
    pub log_buffer: Arc<Mutex<VecDeque<LogEntry>>>,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focused_field: FormField,
    pub table_state: TableState,
    /// Log scroll position
    pub log_scroll: usize,
    changes: watch::Receiver<u64>,
}

impl DashboardApp {
    pub fn new(
        controller: DashboardController,
        log_buffer: Arc<Mutex<VecDeque<LogEntry>>>,
    ) -> Self {
        let changes = controller.subscribe();
        Self {
            controller,
            log_buffer,
            should_quit: false,
            input_mode: InputMode::Table,
            focused_field: FormField::Id,
            table_state: TableState::default(),
            log_scroll: 0,
            changes,
        }
    }

    pub fn rows(&self) -> Vec<RowView> {
        view::rows(self.controller.state())
    }

    pub fn selected_row(&self) -> Option<RowView> {
        let index = self.table_state.selected()?;
        self.rows().into_iter().nth(index)
    }

    pub fn select_next(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            self.table_state.select(None);
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.rows().is_empty() {
            self.table_state.select(None);
            return;
        }
        let previous = self
            .table_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.table_state.select(Some(previous));
    }

    /// Keep the selection on an existing row after the visible set changed
    pub fn clamp_selection(&mut self) {
        let count = self.rows().len();
        let selected = match (count, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
        self.table_state.select(selected);
    }

    /// React to controller changes since the last call
    pub fn sync_with_controller(&mut self) {
        if self.changes.has_changed().unwrap_or(false) {
            self.changes.borrow_and_update();
            self.clamp_selection();
        }
    }

    /// Command for the selected row's action, if the row offers `wanted`
    pub fn row_command(&self, wanted: Option<RowAction>) -> Option<Command> {
        let row = self.selected_row()?;
        match (row.action, wanted) {
            (RowAction::Reject, None | Some(RowAction::Reject)) => Some(Command::Reject(row.id)),
            (RowAction::Hide, None | Some(RowAction::Hide)) => Some(Command::Hide(row.id)),
            _ => None,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut Input {
        let form = self.controller.form_mut();
        match self.focused_field {
            FormField::Id => &mut form.id,
            FormField::FirstName => &mut form.first_name,
            FormField::LastName => &mut form.last_name,
        }
    }

    /// Run a command to completion. Failures were already logged by the controller.
    pub async fn dispatch(&mut self, command: Command) {
        let _ = match command {
            Command::Reject(id) => self.controller.reject(&id).await,
            Command::Hide(id) => self.controller.hide(&id),
            Command::ToggleRejected => {
                self.controller.toggle_rejected_visibility();
                Ok(())
            }
            Command::Submit => self.controller.submit().await,
        };
        self.sync_with_controller();
    }
}
