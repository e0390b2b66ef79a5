use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::history::{EquityHistory, EquityHistoryPoint, MAX_HISTORY_POINTS};
use crate::models::property::PropertyRecord;
use crate::providers::traits::PersistenceProvider;

/// Blob names carried over from the browser-storage era of this data,
/// so an exported dump stays recognizable.
const PROPERTIES_BLOB: &str = "re_portfolio_v1.json";
const HISTORY_BLOB: &str = "re_portfolio_history_v1.json";

/// Local single-user store: two independent JSON blobs in a directory,
/// each a direct serialization of the in-memory sequence. No schema
/// versioning. The scope argument is ignored — the whole directory is
/// one user's data.
///
/// Reads are parse-or-default: a missing or malformed blob is treated as
/// empty (logged, never an error). The history blob is clamped to the
/// most recent [`MAX_HISTORY_POINTS`] on every write.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read and parse one blob; `None` when missing or malformed.
    fn read_blob<T: serde::de::DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.blob_path(name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("malformed blob {}, treating as empty: {e}", path.display());
                None
            }
        }
    }

    fn write_blob<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string(value)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize {name}: {e}")))?;
        std::fs::write(self.blob_path(name), raw)?;
        Ok(())
    }

    fn remove_blob(&self, name: &str) -> Result<(), CoreError> {
        match std::fs::remove_file(self.blob_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load_properties(&self) -> Vec<PropertyRecord> {
        self.read_blob(PROPERTIES_BLOB).unwrap_or_default()
    }

    fn load_history(&self) -> EquityHistory {
        let points: Vec<EquityHistoryPoint> = self.read_blob(HISTORY_BLOB).unwrap_or_default();
        EquityHistory::from_points(points)
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("dir", &self.dir).finish()
    }
}

#[async_trait]
impl PersistenceProvider for LocalStore {
    fn name(&self) -> &str {
        "LocalStore"
    }

    async fn list_properties(&self, _scope: &str) -> Result<Vec<PropertyRecord>, CoreError> {
        Ok(self.load_properties())
    }

    async fn insert_properties(
        &self,
        _scope: &str,
        records: &[PropertyRecord],
    ) -> Result<Vec<PropertyRecord>, CoreError> {
        self.write_blob(PROPERTIES_BLOB, &records)?;
        Ok(records.to_vec())
    }

    async fn upsert_properties(
        &self,
        _scope: &str,
        records: &[PropertyRecord],
    ) -> Result<(), CoreError> {
        // The blob is the whole sequence, so an upsert is a rewrite.
        self.write_blob(PROPERTIES_BLOB, &records)
    }

    async fn list_history(&self, _scope: &str) -> Result<Vec<EquityHistoryPoint>, CoreError> {
        Ok(self.load_history().into_points())
    }

    async fn upsert_history_point(
        &self,
        _scope: &str,
        date: NaiveDate,
        equity: i64,
    ) -> Result<(), CoreError> {
        let mut history = self.load_history();
        history.upsert(date, equity);
        let dropped = history.clamp_oldest(MAX_HISTORY_POINTS);
        if dropped > 0 {
            log::debug!("history clamp dropped {dropped} oldest point(s)");
        }
        self.write_blob(HISTORY_BLOB, &history.points())
    }

    async fn clear(&self, _scope: &str) -> Result<(), CoreError> {
        self.remove_blob(PROPERTIES_BLOB)?;
        self.remove_blob(HISTORY_BLOB)?;
        Ok(())
    }
}

/// Expose the blob names for tooling/tests that inspect the directory.
pub fn blob_names() -> (&'static Path, &'static Path) {
    (Path::new(PROPERTIES_BLOB), Path::new(HISTORY_BLOB))
}
