use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::identity::Identity;
use super::traits::{IdentityListener, SessionProvider};

/// Session provider with a fixed identity — the local single-user variant
/// has no auth service, but the reconciler still wants a scope.
pub struct StaticSession {
    identity: Mutex<Option<Identity>>,
    listeners: Mutex<Vec<IdentityListener>>,
}

impl StaticSession {
    /// A session that is permanently signed in as `identity`
    /// (until `sign_out`).
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Mutex::new(Some(identity)),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// A session with nobody signed in.
    pub fn signed_out() -> Self {
        Self {
            identity: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    fn name(&self) -> &str {
        "StaticSession"
    }

    async fn current_identity(&self) -> Result<Option<Identity>, CoreError> {
        match self.identity.lock() {
            Ok(guard) => Ok(guard.clone()),
            Err(_) => Ok(None),
        }
    }

    fn on_identity_change(&self, listener: IdentityListener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        if let Ok(mut guard) = self.identity.lock() {
            *guard = None;
        }
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(None);
            }
        }
        Ok(())
    }
}
