use serde::{Deserialize, Serialize};

/// The signed-in user that owns a persisted scope.
///
/// `id` is opaque — whatever the Session Provider hands out (a UUID string
/// for the remote backend, any fixed marker for the local variant). All
/// Persistence Provider calls are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque owner id, used as the persistence scope
    pub id: String,

    /// Email the user signed in with, when known
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
        }
    }
}
