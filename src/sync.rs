//! Best-effort mirroring of new tasks to a remote calendar.
//!
//! This is strictly fire-and-forget: one attempt per created task, immediately after
//! the local store persisted it. A failure is logged and reported to the caller, but
//! the local task is never rolled back, and the attempt is never retried. Nothing
//! links a local task to the remote event it produced, so local deletions do not
//! propagate either.

use crate::calendar::EventDraft;
use crate::task::Task;
use crate::traits::RemoteCalendar;

/// What became of the single sync attempt for a created task
#[derive(Clone, Debug, PartialEq)]
pub enum SyncOutcome {
    /// No credential was present, no network call was made
    Skipped,
    /// The remote calendar created the mirrored event and assigned it this id
    Created(String),
    /// The attempt failed (network error, API error or a response with no event id).
    /// The local task is kept; the remote calendar is now out of sync with it
    Failed(String),
}

/// The component translating a local task into a remote calendar event creation
pub struct SyncAdapter<R: RemoteCalendar> {
    remote: R,
}

impl<R: RemoteCalendar> SyncAdapter<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Mirror a freshly created task to the remote calendar, if a credential is present.
    ///
    /// Call this once, after the local store has persisted the task.
    pub async fn sync_on_create(&self, task: &Task, credential: Option<&str>) -> SyncOutcome {
        let token = match credential {
            None => return SyncOutcome::Skipped,
            Some(t) => t,
        };

        let draft = EventDraft::from_task(task);
        match self.remote.create_event(token, &draft).await {
            Ok(event_id) => {
                log::info!("Task {} mirrored as remote event {}", task.id(), event_id);
                SyncOutcome::Created(event_id)
            }
            Err(err) => {
                log::warn!("Unable to mirror task {} to the remote calendar: {}", task.id(), err);
                SyncOutcome::Failed(err.to_string())
            }
        }
    }

    /// Log the next few upcoming remote events.
    ///
    /// This listing is informational only; it never flows back into the task list.
    pub async fn log_upcoming_events(&self, credential: &str) {
        match self.remote.upcoming_events(credential).await {
            Ok(events) => {
                log::info!("{} upcoming remote event(s)", events.len());
                for event in &events {
                    log::info!("  {}", event.display_name());
                }
            }
            Err(err) => {
                log::warn!("Unable to list upcoming remote events: {}", err);
            }
        }
    }
}
