use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::history::EquityHistoryPoint;
use crate::models::property::{PropertyKind, PropertyRecord};
use super::traits::PersistenceProvider;

const PROPERTIES_TABLE: &str = "properties";
const HISTORY_TABLE: &str = "net_worth_history";

/// Remote row store speaking the PostgREST dialect (Supabase-style).
///
/// - Rows are filtered by `owner_id=eq.<scope>` on every call.
/// - Upserts use `Prefer: resolution=merge-duplicates` with an
///   `on_conflict` key, so a second write for the same key replaces the row.
/// - Property listings come back in insertion order (`created_at.asc`),
///   history ascending by date.
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl RemoteStore {
    /// `base_url` is the project root (e.g., `https://xyz.supabase.co`);
    /// `access_token` is the signed-in user's bearer token.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    async fn check_status(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CoreError::Api {
            provider: "RemoteStore".into(),
            message: format!("{what} failed with {status}: {body}"),
        })
    }
}

// ── Wire row types ──────────────────────────────────────────────────

/// A property row as stored remotely. Numeric columns are signed int8 in
/// the database; reads coerce them back to the non-negative model.
#[derive(Serialize, Deserialize)]
struct PropertyRow {
    id: Uuid,
    owner_id: String,
    name: String,
    kind: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    value: i64,
    #[serde(default)]
    debt: i64,
    #[serde(default)]
    rent: i64,
    #[serde(default)]
    mortgage_payment: i64,
}

impl PropertyRow {
    fn from_record(scope: &str, record: &PropertyRecord) -> Self {
        Self {
            id: record.id,
            owner_id: scope.to_string(),
            name: record.name.clone(),
            kind: record.kind.to_string(),
            location: record.location.clone(),
            value: record.value as i64,
            debt: record.debt as i64,
            rent: record.rent as i64,
            mortgage_payment: record.mortgage_payment as i64,
        }
    }

    /// Parse-or-default at the storage boundary: an unexpected kind falls
    /// back to apartment, negative amounts clamp to zero. Malformed rows
    /// never abort a load.
    fn into_record(self) -> PropertyRecord {
        let kind = match self.kind.as_str() {
            "house" => PropertyKind::House,
            "apartment" => PropertyKind::Apartment,
            other => {
                log::warn!("unknown property kind '{other}' in stored row, defaulting to apartment");
                PropertyKind::Apartment
            }
        };
        PropertyRecord {
            id: self.id,
            name: self.name,
            kind,
            location: self.location,
            value: self.value.max(0) as u64,
            debt: self.debt.max(0) as u64,
            rent: self.rent.max(0) as u64,
            mortgage_payment: self.mortgage_payment.max(0) as u64,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryRow {
    owner_id: String,
    date: NaiveDate,
    equity: i64,
}

#[async_trait]
impl PersistenceProvider for RemoteStore {
    fn name(&self) -> &str {
        "RemoteStore"
    }

    async fn list_properties(&self, scope: &str) -> Result<Vec<PropertyRecord>, CoreError> {
        let url = format!(
            "{}?owner_id=eq.{scope}&select=*&order=created_at.asc",
            self.endpoint(PROPERTIES_TABLE)
        );
        log::debug!("GET {url}");

        let resp = self.authed(self.client.get(&url)).send().await?;
        let rows: Vec<PropertyRow> = Self::check_status(resp, "list properties")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "RemoteStore".into(),
                message: format!("Failed to parse property rows: {e}"),
            })?;

        Ok(rows.into_iter().map(PropertyRow::into_record).collect())
    }

    async fn insert_properties(
        &self,
        scope: &str,
        records: &[PropertyRecord],
    ) -> Result<Vec<PropertyRecord>, CoreError> {
        let rows: Vec<PropertyRow> = records
            .iter()
            .map(|r| PropertyRow::from_record(scope, r))
            .collect();

        let resp = self
            .authed(self.client.post(self.endpoint(PROPERTIES_TABLE)))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;

        let stored: Vec<PropertyRow> = Self::check_status(resp, "insert properties")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "RemoteStore".into(),
                message: format!("Failed to parse inserted rows: {e}"),
            })?;

        Ok(stored.into_iter().map(PropertyRow::into_record).collect())
    }

    async fn upsert_properties(
        &self,
        scope: &str,
        records: &[PropertyRecord],
    ) -> Result<(), CoreError> {
        let rows: Vec<PropertyRow> = records
            .iter()
            .map(|r| PropertyRow::from_record(scope, r))
            .collect();

        let url = format!("{}?on_conflict=id", self.endpoint(PROPERTIES_TABLE));
        let resp = self
            .authed(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?;

        Self::check_status(resp, "upsert properties").await?;
        Ok(())
    }

    async fn list_history(&self, scope: &str) -> Result<Vec<EquityHistoryPoint>, CoreError> {
        let url = format!(
            "{}?owner_id=eq.{scope}&select=date,equity&order=date.asc",
            self.endpoint(HISTORY_TABLE)
        );
        log::debug!("GET {url}");

        let resp = self.authed(self.client.get(&url)).send().await?;
        let points: Vec<EquityHistoryPoint> = Self::check_status(resp, "list history")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "RemoteStore".into(),
                message: format!("Failed to parse history rows: {e}"),
            })?;

        Ok(points)
    }

    async fn upsert_history_point(
        &self,
        scope: &str,
        date: NaiveDate,
        equity: i64,
    ) -> Result<(), CoreError> {
        let row = HistoryRow {
            owner_id: scope.to_string(),
            date,
            equity,
        };

        let url = format!("{}?on_conflict=owner_id,date", self.endpoint(HISTORY_TABLE));
        let resp = self
            .authed(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await?;

        Self::check_status(resp, "upsert history point").await?;
        Ok(())
    }

    async fn clear(&self, scope: &str) -> Result<(), CoreError> {
        for table in [HISTORY_TABLE, PROPERTIES_TABLE] {
            let url = format!("{}?owner_id=eq.{scope}", self.endpoint(table));
            let resp = self.authed(self.client.delete(&url)).send().await?;
            Self::check_status(resp, "clear scope").await?;
        }
        Ok(())
    }
}
