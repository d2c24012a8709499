//! The error types this crate can report.
//!
//! These fall into three families: validation errors (the only failures that abort a
//! local mutation), store errors (the local file could not be read or written), and
//! remote errors (network, API or credential problems). Remote failures are always
//! terminal at the point of occurrence: nothing retries them, and none of them ever
//! rolls back a local mutation that already completed.

use thiserror::Error;

use crate::task::TaskId;

/// A required form field is missing or cannot be understood.
///
/// This aborts the submission: the store is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("the {0} field is required")]
    MissingField(&'static str),
    #[error("the {0} field could not be parsed")]
    InvalidField(&'static str),
}

/// A local store operation failed
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task with this identifier exists (it may have been removed already)
    #[error("no task with id {0}")]
    TaskNotFound(TaskId),

    /// There is nothing to export; no file should be produced
    #[error("there are no tasks to export")]
    NothingToExport,

    /// The backing file could not be read or written
    #[error("unable to access the backing file: {0}")]
    Storage(#[from] std::io::Error),

    /// The backing file does not contain a valid task list
    #[error("invalid backing file contents: {0}")]
    InvalidContents(#[from] serde_json::Error),
}

/// A remote calendar call failed.
///
/// These errors are logged and surfaced as warnings, but they never affect the
/// local task list.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request could not be completed (connection problem, DNS failure...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error
    #[error("calendar API error: {0}")]
    Api(String),

    /// The server answered something that does not look like a created event
    #[error("malformed response: no event id")]
    MissingEventId,
}

/// A credential acquisition or validation step failed
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected the credential (typically because it expired).
    /// The stored credential is discarded when this happens.
    #[error("the identity provider rejected the credential")]
    CredentialInvalid,

    /// The redirect URL carries no access token in its fragment
    #[error("no access token found in the redirect URL")]
    NoTokenInRedirect,

    /// The probe request could not be completed. The stored credential is kept
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The credential slot could not be read or written
    #[error("unable to access the credential slot: {0}")]
    Storage(#[from] std::io::Error),
}
