use std::collections::HashSet;

use tokio::sync::watch;

use crate::error::Result;
use crate::http_client::ApplicationsClient;
use crate::models::RecordId;
use crate::storage::HiddenIdStore;

use super::state::{ApplicationForm, DashboardState};

/// Owns the dashboard state and performs the I/O behind every user action.
///
/// Each operation awaits its request, applies the update only on success and
/// bumps the change revision. Failures are logged and returned; the state is
/// left as it was.
pub struct DashboardController {
    client: ApplicationsClient,
    store: HiddenIdStore,
    state: DashboardState,
    changes: watch::Sender<u64>,
}

impl DashboardController {
    pub fn new(client: ApplicationsClient, store: HiddenIdStore) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            client,
            store,
            state: DashboardState::new(),
            changes,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut ApplicationForm {
        &mut self.state.form
    }

    /// Receiver that observes a new revision after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn load_for_test(
        &mut self,
        fetched: Vec<crate::models::Application>,
        hidden: &HashSet<RecordId>,
    ) {
        self.state.replace_applications(fetched, hidden);
        self.notify();
    }

    fn notify(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    /// Fetch every application and merge it with the stored hidden set
    pub async fn load(&mut self) -> Result<()> {
        let fetched = self.client.list_applications().await.inspect_err(|e| {
            tracing::error!(error_kind = e.kind(), "Error fetching applications: {}", e);
        })?;

        let hidden: HashSet<RecordId> = self
            .store
            .load_hidden_ids()
            .inspect_err(|e| {
                tracing::error!(error_kind = e.kind(), "Error reading hidden ids: {}", e);
            })?
            .into_iter()
            .collect();

        self.state.replace_applications(fetched, &hidden);
        tracing::info!(
            total = self.state.applications().len(),
            visible = self.state.visible().count(),
            "Loaded applications"
        );
        self.notify();
        Ok(())
    }

    /// Reject an application on the backend, then mirror it locally
    pub async fn reject(&mut self, id: &RecordId) -> Result<()> {
        self.client.reject_application(id).await.inspect_err(|e| {
            tracing::error!(
                id = %id,
                error_kind = e.kind(),
                "Failed to reject the application: {}",
                e
            );
        })?;

        if !self.state.mark_rejected(id) {
            tracing::warn!(id = %id, "Rejected application is not in the dashboard");
        }
        tracing::info!(id = %id, "Application rejected");
        self.notify();
        Ok(())
    }

    /// Hide an application locally and persist the full hidden set.
    ///
    /// The in-memory change stands even if persisting fails.
    pub fn hide(&mut self, id: &RecordId) -> Result<()> {
        if !self.state.hide(id) {
            tracing::debug!(id = %id, "Hide requested for an unknown application");
        }
        self.notify();

        let hidden = self.state.hidden_ids();
        self.store.save_hidden_ids(&hidden).inspect_err(|e| {
            tracing::error!(id = %id, error_kind = e.kind(), "Failed to persist hidden ids: {}", e);
        })?;

        tracing::info!(id = %id, hidden = hidden.len(), "Application hidden");
        Ok(())
    }

    pub fn toggle_rejected_visibility(&mut self) {
        self.state.toggle_rejected_visibility();
        tracing::info!(
            show_rejected = self.state.show_rejected(),
            "Toggled rejected applications"
        );
        self.notify();
    }

    /// Create an application from the form; the form is cleared only on success
    pub async fn submit(&mut self) -> Result<()> {
        let payload = self.state.form.to_payload(chrono::Utc::now());

        let created = self
            .client
            .create_application(&payload)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    id = %payload.id,
                    error_kind = e.kind(),
                    "Error submitting application: {}",
                    e
                );
            })?;

        tracing::info!(id = %created.id, "Application submitted");
        self.state.append_created(created);
        self.notify();
        Ok(())
    }
}
