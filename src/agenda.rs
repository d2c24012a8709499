//! This module ties the task store, the credential slot and the remote calendar
//! together into a single agenda.

use url::Url;

use crate::auth::{self, AuthState, CredentialStore, UserProfile};
use crate::error::{AuthError, StoreError};
use crate::store::TaskStore;
use crate::sync::{SyncAdapter, SyncOutcome};
use crate::task::{Task, TaskId};
use crate::traits::{IdentityProvider, RemoteCalendar};

/// The agenda: a durable local task list, plus best-effort mirroring of new tasks
/// to a remote calendar once the user has logged in.
///
/// The local store is authoritative and is always written first; remote calls never
/// block or undo a local mutation. `R` and `P` are usually
/// [`GoogleCalendar`](crate::calendar::remote_calendar::GoogleCalendar) and
/// [`GoogleIdentity`](crate::auth::GoogleIdentity), but tests substitute in-memory
/// implementations.
pub struct Agenda<R: RemoteCalendar, P: IdentityProvider> {
    store: TaskStore,
    credentials: CredentialStore,
    sync: SyncAdapter<R>,
    identity: P,
}

impl<R: RemoteCalendar, P: IdentityProvider> Agenda<R, P> {
    pub fn new(store: TaskStore, credentials: CredentialStore, remote: R, identity: P) -> Self {
        Self {
            store,
            credentials,
            sync: SyncAdapter::new(remote),
            identity,
        }
    }

    /// Restore the session state on startup.
    ///
    /// If a credential was stored in a previous session, it is validated against the
    /// identity provider; a rejected credential is silently discarded. When the user
    /// turns out to be logged in, the next few upcoming remote events are fetched and
    /// logged (display only, they never enter the task list).
    pub async fn start_session(&mut self) -> AuthState {
        let state = auth::validate_stored_credential(&mut self.credentials, &self.identity).await;

        if state.is_authenticated() {
            if let Some(token) = self.credentials.token() {
                self.sync.log_upcoming_events(token).await;
            }
        }

        state
    }

    /// Complete a login: extract the token from the redirect URL the identity
    /// provider sent the user back to, persist it, and validate it.
    ///
    /// The fragment should not be processed twice; use [`auth::strip_fragment`] on
    /// whatever copy of the URL is kept around afterwards.
    pub async fn complete_login(&mut self, redirect_url: &Url) -> Result<UserProfile, AuthError> {
        let token =
            auth::token_from_fragment(redirect_url).ok_or(AuthError::NoTokenInRedirect)?;
        self.credentials.store(token.clone())?;

        match self.identity.probe(&token).await {
            Ok(profile) => {
                log::info!("Logged in as {}", profile.display_name());
                Ok(profile)
            }
            Err(AuthError::CredentialInvalid) => {
                self.credentials.clear();
                Err(AuthError::CredentialInvalid)
            }
            Err(err) => Err(err),
        }
    }

    /// Add a task: persist it locally, then attempt the one-shot mirror to the
    /// remote calendar when a credential is present.
    ///
    /// The sync outcome is informational; whatever it is, the task is in the store.
    pub async fn add_task(&mut self, task: Task) -> Result<(TaskId, SyncOutcome), StoreError> {
        let outcome_task = task.clone();
        let id = self.store.add(task)?;
        let outcome = self
            .sync
            .sync_on_create(&outcome_task, self.credentials.token())
            .await;
        Ok((id, outcome))
    }

    /// Remove a task from the local store.
    ///
    /// The mirrored remote event, if any, is not removed: no linkage to it is stored.
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        self.store.remove(id)
    }

    /// The current task list, in insertion order
    pub fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    /// Serialize the task list to CSV (see [`TaskStore::export_csv`])
    pub fn export_csv(&self) -> Result<String, StoreError> {
        self.store.export_csv()
    }

    /// The remote calendar behind the sync adapter.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly
    pub fn remote(&self) -> &R {
        self.sync.remote()
    }

    /// Whether a credential is currently present.
    ///
    /// This does not re-validate it; see [`Self::start_session`]
    pub fn has_credential(&self) -> bool {
        self.credentials.token().is_some()
    }
}
