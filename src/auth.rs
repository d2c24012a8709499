//! Credential acquisition: a one-shot OAuth redirect handshake.
//!
//! Logging in is a full redirect to the identity provider, not an ongoing session:
//! the provider sends the user back with a short-lived bearer token in the URL
//! fragment. This module builds the authorization URL, extracts the token from the
//! redirect, keeps it in a durable slot and validates it against the provider's
//! userinfo endpoint. There is no refresh mechanism: once the provider rejects the
//! token, it is discarded and the user has to log in again.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::config;
use crate::error::AuthError;
use crate::traits::IdentityProvider;

/// Where the authorization redirect starts
pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Where a credential can be validated
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// The scopes requested at login
pub const SCOPES: [&str; 4] = [
    "email",
    "profile",
    "openid",
    "https://www.googleapis.com/auth/calendar.events",
];

/// Whether a usable credential is currently available
#[derive(Debug, PartialEq)]
pub enum AuthState {
    Unauthenticated,
    /// A credential is present. The profile comes from the validation probe; it is
    /// `None` when the probe could not be carried out (e.g. a network failure, which
    /// does not invalidate the credential)
    Authenticated(Option<UserProfile>),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        match self {
            AuthState::Authenticated(_) => true,
            AuthState::Unauthenticated => false,
        }
    }
}

/// Build the URL the user must be sent to in order to log in.
///
/// The response mode asks for the token directly in the redirect fragment
/// (`response_type=token`), so no follow-up token-exchange request is needed.
pub fn authorization_url() -> Url {
    let client_id = config::CLIENT_ID.lock().unwrap().clone();
    let redirect_uri = config::REDIRECT_URI.lock().unwrap().clone();

    let mut url = Url::parse(AUTH_ENDPOINT).unwrap(/* this is a valid static URL */);
    url.query_pairs_mut()
        .append_pair("client_id", &client_id)
        .append_pair("redirect_uri", &redirect_uri)
        .append_pair("response_type", "token")
        .append_pair("scope", &SCOPES.join(" "));
    url
}

/// Extract the access token from the fragment of a redirect URL, if there is one.
///
/// After extraction, callers should discard the fragment (see [`strip_fragment`]) so
/// the token is neither re-processed nor leaked through history or later navigation.
pub fn token_from_fragment(redirect_url: &Url) -> Option<String> {
    let fragment = redirect_url.fragment()?;
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.to_string())
}

/// Return the same URL without its fragment
pub fn strip_fragment(redirect_url: &Url) -> Url {
    let mut url = redirect_url.clone();
    url.set_fragment(None);
    url
}

/// The profile of the logged-in user, fetched from the userinfo endpoint
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// A name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.email.as_deref())
            .unwrap_or("you")
    }
}

/// The durable slot holding the bearer credential.
///
/// There is exactly one credential at a time. It survives restarts, and it is
/// deleted only when the identity provider rejects it.
#[derive(Debug, PartialEq)]
pub struct CredentialStore {
    backing_file: PathBuf,
    token: Option<String>,
}

impl CredentialStore {
    /// Get the default path to the credential slot
    pub fn default_file() -> PathBuf {
        PathBuf::from(String::from("~/.config/unitrack/credential"))
    }

    /// Initialize the slot, reading a previously stored credential if there is one
    pub fn load(path: &Path) -> Self {
        let token = match std::fs::read_to_string(path) {
            Ok(content) => {
                let content = content.trim();
                if content.is_empty() {
                    None
                } else {
                    Some(content.to_string())
                }
            }
            Err(_) => None,
        };

        Self {
            backing_file: PathBuf::from(path),
            token,
        }
    }

    /// The stored credential, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Persist a freshly acquired credential
    pub fn store(&mut self, token: String) -> Result<(), AuthError> {
        if let Some(parent) = self.backing_file.parent() {
            if parent.exists() == false {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.backing_file, &token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Discard the credential, both in memory and on disk
    pub fn clear(&mut self) {
        self.token = None;
        if let Err(err) = std::fs::remove_file(&self.backing_file) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Unable to remove the stored credential: {}", err);
            }
        }
    }
}

/// The Google implementation of [`IdentityProvider`]
pub struct GoogleIdentity {
    userinfo_url: Url,
    http: reqwest::Client,
}

impl GoogleIdentity {
    pub fn new() -> Self {
        Self::with_endpoint(USERINFO_ENDPOINT.parse().unwrap(/* this is a valid static URL */))
    }

    /// Use a non-default userinfo endpoint (e.g. a local test server)
    pub fn with_endpoint(userinfo_url: Url) -> Self {
        Self {
            userinfo_url,
            http: reqwest::Client::new(),
        }
    }
}

impl Default for GoogleIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentity {
    async fn probe(&self, token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        if response.status().is_success() == false {
            log::debug!("Profile probe rejected with status {}", response.status());
            return Err(AuthError::CredentialInvalid);
        }

        let profile = response.json().await?;
        Ok(profile)
    }
}

/// Run the validation probe against the stored credential, if there is one.
///
/// A rejected credential is silently deleted from the slot: the state reverts to
/// [`AuthState::Unauthenticated`] with no other signal. A probe that could not be
/// carried out at all leaves the credential in place.
pub async fn validate_stored_credential(
    credentials: &mut CredentialStore,
    identity: &impl IdentityProvider,
) -> AuthState {
    let token = match credentials.token() {
        None => return AuthState::Unauthenticated,
        Some(t) => t.to_string(),
    };

    match identity.probe(&token).await {
        Ok(profile) => {
            log::info!("Logged in as {}", profile.display_name());
            AuthState::Authenticated(Some(profile))
        }
        Err(AuthError::CredentialInvalid) => {
            log::info!("The stored credential has been rejected, discarding it");
            credentials.clear();
            AuthState::Unauthenticated
        }
        Err(err) => {
            log::warn!("Unable to validate the stored credential: {}", err);
            AuthState::Authenticated(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_carries_the_handshake_parameters() {
        let url = authorization_url();
        assert!(url.as_str().starts_with(AUTH_ENDPOINT));

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("response_type"), "token");
        assert_eq!(
            get("scope"),
            "email profile openid https://www.googleapis.com/auth/calendar.events"
        );
        assert!(get("client_id").is_empty() == false);
        assert!(get("redirect_uri").is_empty() == false);
    }

    #[test]
    fn token_is_extracted_from_the_fragment() {
        let url = Url::parse(
            "http://127.0.0.1:5500/#access_token=ya29.SOME-TOKEN&token_type=Bearer&expires_in=3599",
        )
        .unwrap();
        assert_eq!(token_from_fragment(&url).unwrap(), "ya29.SOME-TOKEN");
    }

    #[test]
    fn urls_without_a_token_yield_none() {
        let plain = Url::parse("http://127.0.0.1:5500/").unwrap();
        assert_eq!(token_from_fragment(&plain), None);

        let unrelated = Url::parse("http://127.0.0.1:5500/#state=xyz").unwrap();
        assert_eq!(token_from_fragment(&unrelated), None);
    }

    #[test]
    fn fragment_can_be_stripped() {
        let url = Url::parse("http://127.0.0.1:5500/#access_token=secret").unwrap();
        assert_eq!(strip_fragment(&url).as_str(), "http://127.0.0.1:5500/");
    }

    #[test]
    fn credential_slot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential");

        let mut slot = CredentialStore::load(&path);
        assert_eq!(slot.token(), None);

        slot.store("ya29.SOME-TOKEN".to_string()).unwrap();
        assert_eq!(CredentialStore::load(&path).token(), Some("ya29.SOME-TOKEN"));

        slot.clear();
        assert_eq!(slot.token(), None);
        assert_eq!(CredentialStore::load(&path).token(), None);
    }

    #[test]
    fn display_name_falls_back_to_the_email() {
        let with_name = UserProfile {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        };
        assert_eq!(with_name.display_name(), "Ada");

        let email_only = UserProfile {
            name: None,
            email: Some("ada@example.com".to_string()),
        };
        assert_eq!(email_only.display_name(), "ada@example.com");
    }
}
