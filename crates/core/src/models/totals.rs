use serde::{Deserialize, Serialize};

/// Aggregate figures over the whole portfolio at one moment.
///
/// Computed, never stored — recomputed whenever the record set changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of all property values
    pub total_value: u64,

    /// Sum of all outstanding debts
    pub total_debt: u64,

    /// total_value − total_debt. Negative when the portfolio is underwater.
    pub total_equity: i64,

    /// Sum of monthly rent income
    pub total_rent: u64,

    /// Sum of monthly mortgage payments
    pub total_mortgage: u64,

    /// total_rent − total_mortgage. May be negative.
    pub net_cashflow: i64,
}
