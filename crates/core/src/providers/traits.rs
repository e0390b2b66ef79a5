use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::history::EquityHistoryPoint;
use crate::models::identity::Identity;
use crate::models::property::PropertyRecord;

/// Called whenever the signed-in identity changes (`None` on sign-out).
pub type IdentityListener = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// Trait abstraction for the authentication/session backend.
///
/// The core never performs reads or writes without an identity from here.
/// Two realizations exist: a remote auth service and a fixed identity for
/// the local single-user variant.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Resolve the currently signed-in identity, if any.
    async fn current_identity(&self) -> Result<Option<Identity>, CoreError>;

    /// Register a listener for sign-in/sign-out transitions.
    /// The caller is responsible for redirecting away when the identity
    /// becomes `None`.
    fn on_identity_change(&self, listener: IdentityListener);

    /// Terminate the session. Listeners are notified with `None`.
    async fn sign_out(&self) -> Result<(), CoreError>;
}

/// Trait abstraction for durable storage of property records and the
/// equity history series, addressed by an opaque per-user scope.
///
/// Two realizations exist: a remote row store with per-row upserts and a
/// scope-less local file store. The reconciler's contract is identical
/// against either.
#[async_trait]
pub trait PersistenceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// All property records in the scope, in insertion order.
    async fn list_properties(&self, scope: &str) -> Result<Vec<PropertyRecord>, CoreError>;

    /// Store a fresh record set (first-access seeding only).
    /// Returns the records as stored.
    async fn insert_properties(
        &self,
        scope: &str,
        records: &[PropertyRecord],
    ) -> Result<Vec<PropertyRecord>, CoreError>;

    /// Insert-or-replace records, keyed by record id within the scope.
    async fn upsert_properties(
        &self,
        scope: &str,
        records: &[PropertyRecord],
    ) -> Result<(), CoreError>;

    /// The equity series for the scope, ascending by date.
    async fn list_history(&self, scope: &str) -> Result<Vec<EquityHistoryPoint>, CoreError>;

    /// Insert-or-replace the point for one day, keyed by (scope, date).
    async fn upsert_history_point(
        &self,
        scope: &str,
        date: NaiveDate,
        equity: i64,
    ) -> Result<(), CoreError>;

    /// Remove everything stored for the scope (full reset).
    async fn clear(&self, scope: &str) -> Result<(), CoreError>;
}
