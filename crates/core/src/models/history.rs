use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of daily points the local store keeps (~10 years).
pub const MAX_HISTORY_POINTS: usize = 3650;

/// One recorded total-equity value for a calendar day.
///
/// The date is the natural key — the series never holds two points
/// for the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityHistoryPoint {
    /// Calendar day, no time-of-day component
    pub date: NaiveDate,

    /// Total portfolio equity on that day. Negative when debt exceeds value.
    pub equity: i64,
}

/// The daily net-worth series: ascending by date, unique by date.
///
/// The vector is private so the sorted-unique invariant cannot be broken
/// from outside. Writes go through [`EquityHistory::upsert`], which replaces
/// any existing point for the same day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityHistory {
    points: Vec<EquityHistoryPoint>,
}

impl EquityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from arbitrary points, restoring the invariant:
    /// sorted ascending, one point per date (the last write for a date wins).
    #[must_use]
    pub fn from_points(mut points: Vec<EquityHistoryPoint>) -> Self {
        points.sort_by_key(|p| p.date); // stable: preserves write order within a date
        points.dedup_by(|later, kept| {
            if later.date == kept.date {
                kept.equity = later.equity;
                true
            } else {
                false
            }
        });
        Self { points }
    }

    /// Insert or replace the point for `date`.
    /// Maintains sorted order using binary search (O(log n) lookup).
    pub fn upsert(&mut self, date: NaiveDate, equity: i64) {
        match self.points.binary_search_by_key(&date, |p| p.date) {
            Ok(idx) => {
                self.points[idx].equity = equity;
            }
            Err(idx) => {
                self.points.insert(idx, EquityHistoryPoint { date, equity });
            }
        }
    }

    /// Drop the oldest points until at most `max` remain.
    /// Returns the number of points removed.
    pub fn clamp_oldest(&mut self, max: usize) -> usize {
        if self.points.len() <= max {
            return 0;
        }
        let excess = self.points.len() - max;
        self.points.drain(..excess);
        excess
    }

    /// All points, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[EquityHistoryPoint] {
        &self.points
    }

    /// The most recent point, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&EquityHistoryPoint> {
        self.points.last()
    }

    /// The point recorded for a specific day, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&EquityHistoryPoint> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| &self.points[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Consume the series, yielding the underlying points.
    #[must_use]
    pub fn into_points(self) -> Vec<EquityHistoryPoint> {
        self.points
    }
}
