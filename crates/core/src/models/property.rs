use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The type/category of a real-estate holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// A flat in a larger building
    Apartment,
    /// A standalone house
    House,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKind::Apartment => write!(f, "apartment"),
            PropertyKind::House => write!(f, "house"),
        }
    }
}

/// A single tracked holding in the portfolio.
///
/// The four amount fields are whole currency units (no minor units) and are
/// unsigned by construction — free-text input is coerced to non-negative
/// integers before it ever reaches this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Stable identifier, assigned at creation and never changed
    pub id: Uuid,

    /// Display label (e.g., "Byt #1")
    pub name: String,

    /// Apartment or house — fixed after creation
    pub kind: PropertyKind,

    /// Optional free-text location (e.g., "Praha")
    #[serde(default)]
    pub location: Option<String>,

    /// Current market value
    #[serde(default)]
    pub value: u64,

    /// Outstanding debt against the holding
    #[serde(default)]
    pub debt: u64,

    /// Monthly rent income
    #[serde(default)]
    pub rent: u64,

    /// Monthly mortgage payment
    #[serde(default)]
    pub mortgage_payment: u64,
}

impl PropertyRecord {
    /// Create a new record with all amounts at zero.
    pub fn new(
        name: impl Into<String>,
        kind: PropertyKind,
        location: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            location,
            value: 0,
            debt: 0,
            rent: 0,
            mortgage_payment: 0,
        }
    }

    /// Equity of this holding: value minus debt. May be negative.
    #[must_use]
    pub fn equity(&self) -> i64 {
        self.value as i64 - self.debt as i64
    }

    /// Monthly cashflow: rent minus mortgage payment. May be negative.
    #[must_use]
    pub fn cashflow(&self) -> i64 {
        self.rent as i64 - self.mortgage_payment as i64
    }
}

/// The default set a fresh user scope is seeded with:
/// three apartments in Praha plus one house with no location.
#[must_use]
pub fn default_portfolio() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord::new("Byt #1", PropertyKind::Apartment, Some("Praha".into())),
        PropertyRecord::new("Byt #2", PropertyKind::Apartment, Some("Praha".into())),
        PropertyRecord::new("Byt #3", PropertyKind::Apartment, Some("Praha".into())),
        PropertyRecord::new("Dům", PropertyKind::House, None),
    ]
}
