use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::identity::Identity;
use super::traits::{IdentityListener, SessionProvider};

/// Remote auth client speaking the GoTrue dialect (Supabase-style).
///
/// Sign-in is a magic link: `request_magic_link` sends the email, the user
/// clicks through, and the frontend hands the resulting access token to
/// `set_access_token`. The identity is then resolved lazily from the
/// `/auth/v1/user` endpoint and cached for the session.
pub struct RemoteSession {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Mutex<Option<String>>,
    identity: Mutex<Option<Identity>>,
    listeners: Mutex<Vec<IdentityListener>>,
}

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteSession {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: Mutex::new(None),
            identity: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn notify(&self, identity: Option<Identity>) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(identity.clone());
            }
        }
    }

    /// Ask the auth service to email a magic sign-in link.
    pub async fn request_magic_link(&self, email: &str) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.endpoint("otp"))
            .header("apikey", &self.api_key)
            .json(&OtpRequest {
                email,
                create_user: true,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Auth(format!(
                "magic link request failed with {status}: {body}"
            )));
        }
        Ok(())
    }

    /// Adopt the access token produced by the magic-link redirect.
    /// Drops any cached identity so the next lookup re-resolves it.
    pub fn set_access_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.access_token.lock() {
            *guard = Some(token.into());
        }
        if let Ok(mut guard) = self.identity.lock() {
            *guard = None;
        }
    }

    /// The current access token, for wiring a `RemoteStore` to this session.
    pub fn access_token(&self) -> Result<String, CoreError> {
        match self.access_token.lock() {
            Ok(guard) => guard.clone().ok_or(CoreError::NotSignedIn),
            Err(_) => Err(CoreError::NotSignedIn),
        }
    }
}

#[async_trait]
impl SessionProvider for RemoteSession {
    fn name(&self) -> &str {
        "RemoteSession"
    }

    async fn current_identity(&self) -> Result<Option<Identity>, CoreError> {
        if let Ok(guard) = self.identity.lock() {
            if let Some(identity) = guard.as_ref() {
                return Ok(Some(identity.clone()));
            }
        }

        let token = match self.access_token.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(t) => t.clone(),
                None => return Ok(None),
            },
            Err(_) => return Ok(None),
        };

        let resp = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Auth(format!(
                "identity lookup failed with {status}: {body}"
            )));
        }

        let user: UserResponse = resp.json().await.map_err(|e| {
            CoreError::Auth(format!("Failed to parse identity response: {e}"))
        })?;

        let identity = Identity {
            id: user.id,
            email: user.email,
        };
        if let Ok(mut guard) = self.identity.lock() {
            *guard = Some(identity.clone());
        }
        Ok(Some(identity))
    }

    fn on_identity_change(&self, listener: IdentityListener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        let token = match self.access_token.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };

        if let Some(token) = token {
            let resp = self
                .client
                .post(self.endpoint("logout"))
                .header("apikey", &self.api_key)
                .bearer_auth(&token)
                .send()
                .await?;

            if !resp.status().is_success() {
                log::warn!("remote logout returned {}", resp.status());
            }
        }

        if let Ok(mut guard) = self.access_token.lock() {
            *guard = None;
        }
        if let Ok(mut guard) = self.identity.lock() {
            *guard = None;
        }
        self.notify(None);
        Ok(())
    }
}
