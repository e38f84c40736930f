use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tui_input::Input;

use crate::models::{Application, ApplicationState, NewApplication, RecordId};

/// Text fields of the new-application form
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub id: Input,
    pub first_name: Input,
    pub last_name: Input,
}

impl ApplicationForm {
    pub fn filled(id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: Input::new(id.to_string()),
            first_name: Input::new(first_name.to_string()),
            last_name: Input::new(last_name.to_string()),
        }
    }

    /// Snapshot of the form as a creation payload
    pub fn to_payload(&self, now: DateTime<Utc>) -> NewApplication {
        NewApplication::new(
            self.id.value(),
            self.first_name.value(),
            self.last_name.value(),
            now,
        )
    }

    pub fn clear(&mut self) {
        self.id.reset();
        self.first_name.reset();
        self.last_name.reset();
    }

    pub fn is_empty(&self) -> bool {
        self.id.value().is_empty()
            && self.first_name.value().is_empty()
            && self.last_name.value().is_empty()
    }
}

/// Everything the dashboard shows, owned in one place.
///
/// Update methods are synchronous and side-effect free; the controller performs
/// the I/O and then applies the matching update.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    applications: Vec<Application>,
    show_rejected: bool,
    pub form: ApplicationForm,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All applications in load/append order, hidden ones included
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn show_rejected(&self) -> bool {
        self.show_rejected
    }

    pub fn visible(&self) -> impl Iterator<Item = &Application> {
        self.applications.iter().filter(|app| app.is_visible)
    }

    /// Replace the list with a fresh backend load.
    ///
    /// Hidden ids start invisible; so does every rejected application.
    pub fn replace_applications(&mut self, fetched: Vec<Application>, hidden: &HashSet<RecordId>) {
        self.applications = fetched
            .into_iter()
            .map(|mut app| {
                app.is_visible = !hidden.contains(&app.id) && !app.is_rejected();
                app
            })
            .collect();
    }

    /// Mark every application with `id` as rejected. Returns whether any matched.
    pub fn mark_rejected(&mut self, id: &RecordId) -> bool {
        let show_rejected = self.show_rejected;
        let mut matched = false;
        for app in self.applications.iter_mut().filter(|app| &app.id == id) {
            app.application_state = ApplicationState::Rejected;
            app.is_visible = show_rejected;
            matched = true;
        }
        matched
    }

    /// Hide every application with `id`. Returns whether any matched.
    pub fn hide(&mut self, id: &RecordId) -> bool {
        let mut matched = false;
        for app in self.applications.iter_mut().filter(|app| &app.id == id) {
            app.is_visible = false;
            matched = true;
        }
        matched
    }

    /// Ids of every currently invisible application, in list order
    pub fn hidden_ids(&self) -> Vec<RecordId> {
        self.applications
            .iter()
            .filter(|app| !app.is_visible)
            .map(|app| app.id.clone())
            .collect()
    }

    /// Flip "show rejected" and apply it to every rejected application.
    ///
    /// The stored hidden set is not consulted, so an individually hidden
    /// application that is also rejected shows up again.
    pub fn toggle_rejected_visibility(&mut self) {
        self.show_rejected = !self.show_rejected;
        let show_rejected = self.show_rejected;
        for app in self.applications.iter_mut().filter(|app| app.is_rejected()) {
            app.is_visible = show_rejected;
        }
    }

    /// Append a freshly created application and reset the form
    pub fn append_created(&mut self, mut app: Application) {
        app.is_visible = true;
        self.applications.push(app);
        self.form.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;
    use proptest::prelude::*;

    fn app(id: i64, state: ApplicationState) -> Application {
        Application {
            id: RecordId::Number(id),
            application_state: state,
            candidate: Candidate::default(),
            updated_on: None,
            is_visible: false,
        }
    }

    fn hidden(ids: &[i64]) -> HashSet<RecordId> {
        ids.iter().map(|id| RecordId::Number(*id)).collect()
    }

    fn loaded(apps: Vec<Application>, hidden_ids: &[i64]) -> DashboardState {
        let mut state = DashboardState::new();
        state.replace_applications(apps, &hidden(hidden_ids));
        state
    }

    #[test]
    fn test_load_visibility_rules() {
        let state = loaded(
            vec![
                app(1, ApplicationState::New),
                app(2, ApplicationState::Rejected),
                app(3, ApplicationState::New),
                app(4, ApplicationState::Other("Interviewing".to_string())),
            ],
            &[3],
        );

        let visible: Vec<bool> = state.applications().iter().map(|a| a.is_visible).collect();
        assert_eq!(visible, vec![true, false, false, true]);
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let mut state = loaded(vec![app(1, ApplicationState::New)], &[]);
        state.replace_applications(vec![app(2, ApplicationState::New)], &HashSet::new());

        assert_eq!(state.applications().len(), 1);
        assert_eq!(state.applications()[0].id, RecordId::Number(2));
    }

    #[test]
    fn test_reject_follows_toggle() {
        let mut state = loaded(
            vec![app(1, ApplicationState::New), app(2, ApplicationState::New)],
            &[],
        );

        assert!(state.mark_rejected(&RecordId::Number(1)));
        assert!(state.applications()[0].is_rejected());
        assert!(!state.applications()[0].is_visible);

        state.toggle_rejected_visibility();
        assert!(state.mark_rejected(&RecordId::Number(2)));
        assert!(state.applications()[1].is_visible);
    }

    #[test]
    fn test_reject_unknown_id() {
        let mut state = loaded(vec![app(1, ApplicationState::New)], &[]);
        let before = state.applications().to_vec();

        assert!(!state.mark_rejected(&RecordId::Number(99)));
        assert_eq!(state.applications(), before.as_slice());
    }

    #[test]
    fn test_hide_and_hidden_ids() {
        let mut state = loaded(
            vec![
                app(1, ApplicationState::New),
                app(2, ApplicationState::Rejected),
                app(3, ApplicationState::New),
            ],
            &[],
        );

        assert!(state.hide(&RecordId::Number(3)));
        assert!(!state.applications()[2].is_visible);
        // Rejected-and-invisible entries count as hidden too
        assert_eq!(
            state.hidden_ids(),
            vec![RecordId::Number(2), RecordId::Number(3)]
        );
    }

    #[test]
    fn test_hide_is_idempotent_and_tolerates_unknown_ids() {
        let mut state = loaded(vec![app(1, ApplicationState::New)], &[]);

        assert!(state.hide(&RecordId::Number(1)));
        assert!(state.hide(&RecordId::Number(1)));
        assert!(!state.hide(&RecordId::from("nope")));
        assert_eq!(state.hidden_ids(), vec![RecordId::Number(1)]);
    }

    #[test]
    fn test_toggle_shows_individually_hidden_rejected_application() {
        let mut state = loaded(vec![app(1, ApplicationState::Rejected)], &[1]);
        assert!(!state.applications()[0].is_visible);

        state.toggle_rejected_visibility();
        assert!(state.show_rejected());
        assert!(state.applications()[0].is_visible);
    }

    #[test]
    fn test_append_created_clears_form() {
        let mut state = DashboardState::new();
        state.form = ApplicationForm::filled("42", "Ada", "Lovelace");

        state.append_created(app(42, ApplicationState::New));

        assert_eq!(state.applications().len(), 1);
        assert!(state.applications()[0].is_visible);
        assert!(state.form.is_empty());
    }

    #[test]
    fn test_form_payload_uses_current_values() {
        let form = ApplicationForm::filled("7", "Grace", "Hopper");
        let payload = form.to_payload(Utc::now());

        assert_eq!(payload.id, RecordId::from("7"));
        assert_eq!(payload.candidate.first_name.as_deref(), Some("Grace"));
        assert_eq!(payload.candidate.last_name.as_deref(), Some("Hopper"));
        assert_eq!(payload.application_state, ApplicationState::New);
    }

    fn arb_state() -> impl Strategy<Value = ApplicationState> {
        prop_oneof![
            Just(ApplicationState::New),
            Just(ApplicationState::Rejected),
            "[A-Z][a-z]{2,8}".prop_map(ApplicationState::from),
        ]
    }

    proptest! {
        #[test]
        fn prop_load_visibility(
            states in prop::collection::vec(arb_state(), 0..20),
            hidden_mask in prop::collection::vec(any::<bool>(), 20),
        ) {
            let apps: Vec<Application> = states
                .iter()
                .enumerate()
                .map(|(i, s)| app(i as i64, s.clone()))
                .collect();
            let hidden_ids: Vec<i64> = (0..states.len() as i64)
                .filter(|i| hidden_mask[*i as usize])
                .collect();

            let state = loaded(apps, &hidden_ids);

            prop_assert_eq!(state.applications().len(), states.len());
            for (i, entry) in state.applications().iter().enumerate() {
                if hidden_mask[i] {
                    prop_assert!(!entry.is_visible);
                } else {
                    prop_assert_eq!(entry.is_visible, !entry.is_rejected());
                }
            }
        }

        #[test]
        fn prop_toggle_twice_is_identity(
            states in prop::collection::vec(arb_state(), 0..20),
            hides in prop::collection::vec(0i64..20, 0..5),
            start_shown in any::<bool>(),
        ) {
            let apps: Vec<Application> = states
                .iter()
                .enumerate()
                .map(|(i, s)| app(i as i64, s.clone()))
                .collect();
            let mut state = loaded(apps, &[]);
            if start_shown {
                state.toggle_rejected_visibility();
            }
            for id in &hides {
                state.hide(&RecordId::Number(*id));
            }

            // Bring rejected entries in line with the toggle first
            state.toggle_rejected_visibility();
            state.toggle_rejected_visibility();
            let before = state.applications().to_vec();

            state.toggle_rejected_visibility();
            for (old, new) in before.iter().zip(state.applications()) {
                if !old.is_rejected() {
                    prop_assert_eq!(old, new);
                }
            }

            state.toggle_rejected_visibility();
            prop_assert_eq!(state.applications(), before.as_slice());
        }

        #[test]
        fn prop_hidden_ids_match_invisible_entries(
            states in prop::collection::vec(arb_state(), 0..20),
            hides in prop::collection::vec(0i64..25, 0..10),
        ) {
            let apps: Vec<Application> = states
                .iter()
                .enumerate()
                .map(|(i, s)| app(i as i64, s.clone()))
                .collect();
            let mut state = loaded(apps, &[]);
            for id in &hides {
                state.hide(&RecordId::Number(*id));
            }

            let ids = state.hidden_ids();
            for entry in state.applications() {
                prop_assert_eq!(ids.contains(&entry.id), !entry.is_visible);
            }

            // Reloading from the recomputed set reproduces the same set
            let stored: HashSet<RecordId> = ids.iter().cloned().collect();
            let mut reloaded = DashboardState::new();
            reloaded.replace_applications(state.applications().to_vec(), &stored);
            prop_assert_eq!(reloaded.hidden_ids(), ids);
        }
    }
}
