use async_trait::async_trait;

use crate::auth::UserProfile;
use crate::calendar::{EventDraft, RemoteEvent};
use crate::error::{AuthError, RemoteError};

/// A remote calendar that agenda entries can be mirrored to.
///
/// The only production implementation is [`GoogleCalendar`](crate::calendar::remote_calendar::GoogleCalendar).
/// Tests substitute an in-memory implementation, so that sync scenarios can be
/// exercised without a server.
#[async_trait]
pub trait RemoteCalendar {
    /// Create an event on the user's primary calendar.
    /// Returns the identifier the server assigned to the new event
    async fn create_event(&self, token: &str, draft: &EventDraft) -> Result<String, RemoteError>;

    /// Fetch the next few upcoming events, ordered by start time.
    /// This is for display/logging purposes only, the result never flows into the task list
    async fn upcoming_events(&self, token: &str) -> Result<Vec<RemoteEvent>, RemoteError>;
}

/// The identity provider a bearer credential can be validated against
#[async_trait]
pub trait IdentityProvider {
    /// Validate a credential by fetching the profile of the user it belongs to.
    /// A rejection (as opposed to a network failure) means the credential is no longer usable
    async fn probe(&self, token: &str) -> Result<UserProfile, AuthError>;
}
