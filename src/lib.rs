//! This crate provides a local task agenda that can mirror its tasks to Google Calendar.
//!
//! Tasks live in a [`TaskStore`](store::TaskStore): an ordered list persisted to a local
//! file on every mutation, so the file and the in-memory list never diverge.
//!
//! Once the user has logged in (a one-shot OAuth redirect handshake, see the [`auth`]
//! module), each newly created task is also mirrored to the user's primary calendar by a
//! [`SyncAdapter`](sync::SyncAdapter). This mirroring is best-effort: it happens after the
//! local write, it is attempted exactly once, and its failure never affects the local list.
//!
//! An [`Agenda`] ties these components together into one object.

pub mod traits;

mod task;
pub use task::{Task, TaskId};
pub mod store;
pub use store::TaskStore;
pub mod calendar;
pub use calendar::remote_calendar::GoogleCalendar;
pub mod sync;
pub use sync::{SyncAdapter, SyncOutcome};
pub mod auth;
pub use auth::{AuthState, CredentialStore, GoogleIdentity};
pub mod agenda;
pub use agenda::Agenda;

pub mod error;
pub mod config;
pub mod utils;

/// An [`Agenda`] over the real Google endpoints
pub type GoogleAgenda = Agenda<GoogleCalendar, GoogleIdentity>;
