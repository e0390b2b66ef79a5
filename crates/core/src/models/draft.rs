use crate::models::property::PropertyRecord;

/// Ephemeral text-form edit state for one [`PropertyRecord`].
///
/// Holds whatever the user typed — "7 450 000", "7,450,000", even garbage.
/// Never persisted: discarded on cancel, normalized to integers and merged
/// into the committed record on save. `Default` is empty text, which
/// normalizes to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRow {
    pub value: String,
    pub debt: String,
    pub rent: String,
    pub mortgage_payment: String,
}

impl DraftRow {
    /// Start an edit session from a committed record's current amounts.
    #[must_use]
    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            value: record.value.to_string(),
            debt: record.debt.to_string(),
            rent: record.rent.to_string(),
            mortgage_payment: record.mortgage_payment.to_string(),
        }
    }

    /// A row with explicit "0" in every field (fresh-form state).
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            value: "0".into(),
            debt: "0".into(),
            rent: "0".into(),
            mortgage_payment: "0".into(),
        }
    }
}
