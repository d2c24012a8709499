//! In-memory stand-ins for the remote calendar and the identity provider,
//! so that sync and login scenarios can run without a server
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use unitrack::auth::UserProfile;
use unitrack::calendar::{EventDraft, RemoteEvent};
use unitrack::error::{AuthError, RemoteError};
use unitrack::traits::{IdentityProvider, RemoteCalendar};

/// How the mocked calendar answers `create_event` calls
#[derive(Clone, Copy, Debug)]
pub enum CreateBehaviour {
    /// Answer like a server that created the event
    Succeed,
    /// Answer like a server that rejected the request
    ApiError,
    /// Answer with a well-formed response that carries no event id
    AnswerWithoutId,
}

/// An in-memory remote calendar that records every call it receives
pub struct MockCalendar {
    pub behaviour: CreateBehaviour,
    /// Every draft a `create_event` call carried, in call order
    pub created: Mutex<Vec<EventDraft>>,
    /// Events returned by `upcoming_events`
    pub upcoming: Vec<RemoteEvent>,
    /// How many `upcoming_events` calls were received
    pub listings: Mutex<u32>,
}

impl MockCalendar {
    pub fn new(behaviour: CreateBehaviour) -> Self {
        Self {
            behaviour,
            created: Mutex::new(Vec::new()),
            upcoming: Vec::new(),
            listings: Mutex::new(0),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteCalendar for MockCalendar {
    async fn create_event(&self, _token: &str, draft: &EventDraft) -> Result<String, RemoteError> {
        self.created.lock().unwrap().push(draft.clone());

        match self.behaviour {
            CreateBehaviour::Succeed => {
                let event_id = format!("mock-event-{}", self.created.lock().unwrap().len());
                Ok(event_id)
            }
            CreateBehaviour::ApiError => {
                Err(RemoteError::Api("mocked rejection".to_string()))
            }
            CreateBehaviour::AnswerWithoutId => Err(RemoteError::MissingEventId),
        }
    }

    async fn upcoming_events(&self, _token: &str) -> Result<Vec<RemoteEvent>, RemoteError> {
        *self.listings.lock().unwrap() += 1;
        Ok(self.upcoming.clone())
    }
}

/// An in-memory identity provider that accepts or rejects every credential
pub struct MockIdentity {
    pub accepts: bool,
    pub profile: UserProfile,
    /// How many probe calls were received
    pub probes: Mutex<u32>,
}

impl MockIdentity {
    pub fn accepting(name: &str) -> Self {
        Self {
            accepts: true,
            profile: UserProfile {
                name: Some(name.to_string()),
                email: None,
            },
            probes: Mutex::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accepts: false,
            profile: UserProfile::default(),
            probes: Mutex::new(0),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn probe(&self, _token: &str) -> Result<UserProfile, AuthError> {
        *self.probes.lock().unwrap() += 1;
        if self.accepts {
            Ok(self.profile.clone())
        } else {
            Err(AuthError::CredentialInvalid)
        }
    }
}
