use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use super::app::{Command, DashboardApp, InputMode};
use super::view::RowAction;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Wait briefly for a key press and translate it.
///
/// UI-only keys are applied to `app` directly; anything that needs the
/// controller comes back as a `Command`.
pub fn handle_events(app: &mut DashboardApp) -> io::Result<Option<Command>> {
    if event::poll(POLL_TIMEOUT)? {
        if let Event::Key(key_event) = event::read()? {
            return Ok(handle_key_event(app, key_event));
        }
    }
    Ok(None)
}

fn handle_key_event(app: &mut DashboardApp, key: KeyEvent) -> Option<Command> {
    if key.kind != event::KeyEventKind::Press {
        return None;
    }

    match app.input_mode {
        InputMode::Table => handle_table_mode(app, key),
        InputMode::Form => handle_form_mode(app, key),
    }
}

fn handle_table_mode(app: &mut DashboardApp, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('t') => return Some(Command::ToggleRejected),
        KeyCode::Char('n') | KeyCode::Char('i') => {
            app.input_mode = InputMode::Form;
        }
        KeyCode::Enter => return app.row_command(None),
        KeyCode::Char('r') => return app.row_command(Some(RowAction::Reject)),
        KeyCode::Char('h') => return app.row_command(Some(RowAction::Hide)),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        // Log scroll counts back from the newest entry
        KeyCode::PageUp => {
            let len = app.log_buffer.lock().map(|logs| logs.len()).unwrap_or(0);
            app.log_scroll = app.log_scroll.saturating_add(10).min(len);
        }
        KeyCode::PageDown => {
            app.log_scroll = app.log_scroll.saturating_sub(10);
        }
        KeyCode::End => {
            app.log_scroll = 0;
        }
        _ => {}
    }
    None
}

fn handle_form_mode(app: &mut DashboardApp, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Table;
            return Some(Command::Submit);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Table;
        }
        KeyCode::Tab => {
            app.focused_field = app.focused_field.next();
        }
        KeyCode::BackTab => {
            app.focused_field = app.focused_field.previous();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        _ => {
            app.focused_input_mut().handle_event(&Event::Key(key));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::app::{FormField, LogEntry};
    use crate::dashboard::controller::DashboardController;
    use crate::http_client::ApplicationsClient;
    use crate::models::{Application, ApplicationState, Candidate, RecordId};
    use crate::storage::HiddenIdStore;
    use std::collections::{HashSet, VecDeque};
    use std::sync::{Arc, Mutex};

    fn create_test_app() -> DashboardApp {
        let client = ApplicationsClient::new("http://127.0.0.1:1", 1, 1).unwrap();
        let store = HiddenIdStore::open_in_memory().unwrap();
        let controller = DashboardController::new(client, store);
        DashboardApp::new(controller, Arc::new(Mutex::new(VecDeque::new())))
    }

    fn app_with_rows(states: &[ApplicationState]) -> DashboardApp {
        let mut app = create_test_app();
        let apps = states
            .iter()
            .enumerate()
            .map(|(i, state)| Application {
                id: RecordId::Number(i as i64 + 1),
                application_state: state.clone(),
                candidate: Candidate::default(),
                updated_on: None,
                is_visible: false,
            })
            .collect();
        app.controller.load_for_test(apps, &HashSet::new());
        app.clamp_selection();
        app
    }

    fn press(app: &mut DashboardApp, code: KeyCode) -> Option<Command> {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_key() {
        let mut app = create_test_app();
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_key() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c() {
        let mut app = create_test_app();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_key_event(&mut app, key);
        assert!(app.should_quit);
    }

    #[test]
    fn test_toggle_key() {
        let mut app = create_test_app();
        assert_eq!(
            press(&mut app, KeyCode::Char('t')),
            Some(Command::ToggleRejected)
        );
    }

    #[test]
    fn test_enter_runs_row_action() {
        let mut app = app_with_rows(&[ApplicationState::New]);
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Some(Command::Reject(RecordId::Number(1)))
        );
    }

    #[test]
    fn test_reject_and_hide_keys_match_row_action() {
        let mut app = app_with_rows(&[ApplicationState::New, ApplicationState::Rejected]);
        app.controller.toggle_rejected_visibility();
        app.sync_with_controller();

        // First row is not rejected: only Reject applies
        assert_eq!(press(&mut app, KeyCode::Char('h')), None);
        assert_eq!(
            press(&mut app, KeyCode::Char('r')),
            Some(Command::Reject(RecordId::Number(1)))
        );

        press(&mut app, KeyCode::Down);
        assert_eq!(press(&mut app, KeyCode::Char('r')), None);
        assert_eq!(
            press(&mut app, KeyCode::Char('h')),
            Some(Command::Hide(RecordId::Number(2)))
        );
    }

    #[test]
    fn test_row_keys_without_rows() {
        let mut app = create_test_app();
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app_with_rows(&[ApplicationState::New, ApplicationState::New]);
        assert_eq!(app.table_state.selected(), Some(0));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.table_state.selected(), Some(0));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn test_form_mode_typing_and_submit() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Form);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.focused_field, FormField::FirstName);

        let form = &app.controller.state().form;
        assert_eq!(form.id.value(), "42");
        assert_eq!(form.first_name.value(), "A");

        assert_eq!(press(&mut app, KeyCode::Enter), Some(Command::Submit));
        assert_eq!(app.input_mode, InputMode::Table);
    }

    #[test]
    fn test_form_keys_do_not_quit() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('q'));

        assert!(!app.should_quit);
        assert_eq!(app.controller.state().form.id.value(), "q");
    }

    #[test]
    fn test_form_escape_keeps_contents() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Table);
        assert!(!app.should_quit);
        assert_eq!(app.controller.state().form.id.value(), "x");
    }

    #[test]
    fn test_back_tab_cycles_backwards() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_field, FormField::LastName);
    }

    #[test]
    fn test_log_scroll() {
        let mut app = create_test_app();
        {
            let mut logs = app.log_buffer.lock().unwrap();
            for i in 0..25 {
                logs.push_back(LogEntry {
                    timestamp: chrono::Utc::now(),
                    level: tracing::Level::INFO,
                    message: format!("line {}", i),
                });
            }
        }

        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.log_scroll, 10);

        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.log_scroll, 25);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.log_scroll, 15);

        press(&mut app, KeyCode::End);
        assert_eq!(app.log_scroll, 0);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.log_scroll, 0);
    }
}
