//! The Google Calendar implementation of [`RemoteCalendar`]

use async_trait::async_trait;
use url::Url;

use super::{EventDraft, RemoteEvent};
use crate::error::RemoteError;
use crate::traits::RemoteCalendar;

/// The events collection of the user's primary calendar
pub const EVENTS_ENDPOINT: &str =
    "https://www.googleapis.com/calendar/v3/calendars/primary/events";

/// How many upcoming events a listing fetches at most
const UPCOMING_EVENTS_COUNT: u32 = 5;

/// A remote calendar backed by the Google Calendar API.
///
/// Every call authenticates with the bearer credential it is handed; this struct
/// itself holds no credential and no per-user state.
pub struct GoogleCalendar {
    events_url: Url,
    http: reqwest::Client,
}

impl GoogleCalendar {
    pub fn new() -> Self {
        Self::with_endpoint(EVENTS_ENDPOINT.parse().unwrap(/* this is a valid static URL */))
    }

    /// Use a non-default events collection (e.g. a local test server)
    pub fn with_endpoint(events_url: Url) -> Self {
        Self {
            events_url,
            http: reqwest::Client::new(),
        }
    }
}

impl Default for GoogleCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteCalendar for GoogleCalendar {
    async fn create_event(&self, token: &str, draft: &EventDraft) -> Result<String, RemoteError> {
        let response: serde_json::Value = self
            .http
            .post(self.events_url.clone())
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.get("error") {
            return Err(RemoteError::Api(err.to_string()));
        }

        // The server signals success by answering with the created event, id included
        let event_id = response
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or(RemoteError::MissingEventId)?;

        Ok(event_id.to_string())
    }

    async fn upcoming_events(&self, token: &str) -> Result<Vec<RemoteEvent>, RemoteError> {
        let mut url = self.events_url.clone();
        url.query_pairs_mut()
            .append_pair("maxResults", &UPCOMING_EVENTS_COUNT.to_string())
            .append_pair("orderBy", "startTime")
            .append_pair("singleEvents", "true");

        let response: serde_json::Value = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.get("error") {
            return Err(RemoteError::Api(err.to_string()));
        }

        let items = match response.get("items") {
            Some(items) => items.clone(),
            None => return Ok(Vec::new()),
        };
        let events: Vec<RemoteEvent> = serde_json::from_value(items)
            .map_err(|err| RemoteError::Api(format!("unexpected items list: {}", err)))?;

        Ok(events)
    }
}
