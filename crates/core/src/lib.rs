pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::draft::DraftRow;
use models::history::{EquityHistory, EquityHistoryPoint};
use models::identity::Identity;
use models::property::{default_portfolio, PropertyRecord};
use models::totals::PortfolioTotals;
use providers::traits::{PersistenceProvider, SessionProvider};
use services::reconcile_service::ReconcileService;

use errors::CoreError;

/// Main entry point for the Estate Tracker core library.
///
/// One instance per active session: owns the in-memory property records and
/// the equity history series for its scope, and reconciles user edits into
/// the Persistence Provider. All provider calls happen as a strict
/// sequence — nothing here runs concurrently with a pending call it
/// depends on.
#[must_use]
pub struct EstateTracker {
    identity: Identity,
    properties: Vec<PropertyRecord>,
    history: EquityHistory,
    reconcile_service: ReconcileService,
    session: Arc<dyn SessionProvider>,
    store: Arc<dyn PersistenceProvider>,
}

impl std::fmt::Debug for EstateTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstateTracker")
            .field("scope", &self.identity.id)
            .field("properties", &self.properties.len())
            .field("history_points", &self.history.len())
            .field("store", &self.store.name())
            .finish()
    }
}

impl EstateTracker {
    /// Open a tracker for whoever is currently signed in.
    ///
    /// Returns `Ok(None)` when no identity is present — the caller should
    /// redirect to sign-in. On first access for a scope the default
    /// property set is seeded (all amounts zero) and persisted before this
    /// returns. Concurrent first access from two sessions is not guarded;
    /// the later writer wins.
    pub async fn open(
        session: Arc<dyn SessionProvider>,
        store: Arc<dyn PersistenceProvider>,
    ) -> Result<Option<Self>, CoreError> {
        let identity = match session.current_identity().await? {
            Some(identity) => identity,
            None => return Ok(None),
        };

        let mut properties = store.list_properties(&identity.id).await?;
        if properties.is_empty() {
            properties = store
                .insert_properties(&identity.id, &default_portfolio())
                .await?;
        }

        let history = EquityHistory::from_points(store.list_history(&identity.id).await?);

        Ok(Some(Self {
            identity,
            properties,
            history,
            reconcile_service: ReconcileService::new(),
            session,
            store,
        }))
    }

    // ── State Access ────────────────────────────────────────────────

    /// The identity this tracker is scoped to.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Committed property records, in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    /// The equity series, ascending by date.
    #[must_use]
    pub fn history(&self) -> &[EquityHistoryPoint] {
        self.history.points()
    }

    /// The most recently recorded equity point, if any.
    #[must_use]
    pub fn latest_point(&self) -> Option<&EquityHistoryPoint> {
        self.history.latest()
    }

    /// Aggregate totals over the committed records.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        self.reconcile_service.compute_totals(&self.properties)
    }

    // ── Edit Session ────────────────────────────────────────────────

    /// Start an edit session: the committed amounts as editable text,
    /// one row per record. Discard the rows to cancel.
    #[must_use]
    pub fn open_draft(&self) -> Vec<DraftRow> {
        self.reconcile_service.draft_rows(&self.properties)
    }

    /// Commit an edited draft: normalize, persist, record today's equity.
    ///
    /// The merged record set is persisted first and only swapped into
    /// memory on success, so a failed write leaves both this tracker and
    /// the caller's draft untouched for retry. On success the new total
    /// equity is upserted into the history under today's UTC date
    /// (cross-timezone day-boundary drift is accepted), then the series is
    /// re-read from the store so any store-side bound is reflected here.
    pub async fn commit_draft(&mut self, draft: &[DraftRow]) -> Result<(), CoreError> {
        let merged = self.reconcile_service.merge_draft(&self.properties, draft);
        self.store
            .upsert_properties(&self.identity.id, &merged)
            .await?;
        self.properties = merged;

        let totals = self.reconcile_service.compute_totals(&self.properties);
        let today = chrono::Utc::now().date_naive();
        self.store
            .upsert_history_point(&self.identity.id, today, totals.total_equity)
            .await?;

        match self.store.list_history(&self.identity.id).await {
            Ok(points) => self.history = EquityHistory::from_points(points),
            Err(e) => {
                // Not fatal: the point is durable, patch the local series.
                log::warn!(
                    "history reload after commit failed ({}): {e}",
                    self.store.name()
                );
                self.history.upsert(today, totals.total_equity);
            }
        }

        Ok(())
    }

    // ── Store Sync ──────────────────────────────────────────────────

    /// Re-read records and history from the store, replacing in-memory
    /// state. Does not seed — an externally emptied scope stays empty
    /// until the next `open`.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        self.properties = self.store.list_properties(&self.identity.id).await?;
        self.history =
            EquityHistory::from_points(self.store.list_history(&self.identity.id).await?);
        Ok(())
    }

    /// Wipe the scope and start over: clear the store, reseed the default
    /// record set, empty the series.
    pub async fn reset_all(&mut self) -> Result<(), CoreError> {
        self.store.clear(&self.identity.id).await?;
        self.properties = self
            .store
            .insert_properties(&self.identity.id, &default_portfolio())
            .await?;
        self.history.clear();
        Ok(())
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Terminate the session. The tracker should be dropped afterwards;
    /// its in-memory state is no longer backed by an identity.
    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.session.sign_out().await
    }
}
