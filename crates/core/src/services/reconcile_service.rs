use crate::models::draft::DraftRow;
use crate::models::property::PropertyRecord;
use crate::models::totals::PortfolioTotals;

/// Reconciles user-edited drafts with committed property records and
/// computes aggregate totals.
///
/// Pure business logic — no I/O, no provider calls. Easy to test.
pub struct ReconcileService;

impl ReconcileService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize free-form numeric text to a non-negative integer amount.
    ///
    /// Every non-digit character is discarded, so "7 450 000", "7,450,000"
    /// and "7.450.000" all normalize to 7450000. An empty remainder is 0.
    /// A leading minus is discarded like any other separator, so negative
    /// text normalizes positive. Accumulation saturates at `u64::MAX`.
    #[must_use]
    pub fn parse_amount(&self, input: &str) -> u64 {
        input
            .chars()
            .filter(char::is_ascii_digit)
            .fold(0u64, |acc, c| {
                acc.saturating_mul(10)
                    .saturating_add(u64::from(c as u8 - b'0'))
            })
    }

    /// Open an edit session: one text row per committed record.
    #[must_use]
    pub fn draft_rows(&self, records: &[PropertyRecord]) -> Vec<DraftRow> {
        records.iter().map(DraftRow::from_record).collect()
    }

    /// Merge an edited draft onto the committed records, positionally.
    ///
    /// Each amount field is replaced by the normalized draft text; `id`,
    /// `name`, `kind` and `location` are carried over unchanged. A draft
    /// row missing for some index is treated as all-zero text.
    #[must_use]
    pub fn merge_draft(
        &self,
        records: &[PropertyRecord],
        draft: &[DraftRow],
    ) -> Vec<PropertyRecord> {
        let blank = DraftRow::default();
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let row = draft.get(i).unwrap_or(&blank);
                PropertyRecord {
                    value: self.parse_amount(&row.value),
                    debt: self.parse_amount(&row.debt),
                    rent: self.parse_amount(&row.rent),
                    mortgage_payment: self.parse_amount(&row.mortgage_payment),
                    ..record.clone()
                }
            })
            .collect()
    }

    /// Compute aggregate totals over the record set.
    /// Pure and idempotent: identical input gives identical output.
    #[must_use]
    pub fn compute_totals(&self, records: &[PropertyRecord]) -> PortfolioTotals {
        let total_value: u64 = records.iter().map(|r| r.value).sum();
        let total_debt: u64 = records.iter().map(|r| r.debt).sum();
        let total_rent: u64 = records.iter().map(|r| r.rent).sum();
        let total_mortgage: u64 = records.iter().map(|r| r.mortgage_payment).sum();

        PortfolioTotals {
            total_value,
            total_debt,
            total_equity: total_value as i64 - total_debt as i64,
            total_rent,
            total_mortgage,
            net_cashflow: total_rent as i64 - total_mortgage as i64,
        }
    }
}

impl Default for ReconcileService {
    fn default() -> Self {
        Self::new()
    }
}
