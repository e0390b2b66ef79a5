// ═══════════════════════════════════════════════════════════════════
// Model Tests — PropertyRecord, EquityHistory, DraftRow, Identity
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use estate_tracker_core::models::draft::DraftRow;
use estate_tracker_core::models::history::{
    EquityHistory, EquityHistoryPoint, MAX_HISTORY_POINTS,
};
use estate_tracker_core::models::identity::Identity;
use estate_tracker_core::models::property::{default_portfolio, PropertyKind, PropertyRecord};
use estate_tracker_core::models::totals::PortfolioTotals;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  PropertyKind
// ═══════════════════════════════════════════════════════════════════

mod property_kind {
    use super::*;

    #[test]
    fn display_apartment() {
        assert_eq!(PropertyKind::Apartment.to_string(), "apartment");
    }

    #[test]
    fn display_house() {
        assert_eq!(PropertyKind::House.to_string(), "house");
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&PropertyKind::Apartment).unwrap(),
            "\"apartment\""
        );
        let back: PropertyKind = serde_json::from_str("\"house\"").unwrap();
        assert_eq!(back, PropertyKind::House);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PropertyRecord
// ═══════════════════════════════════════════════════════════════════

mod property_record {
    use super::*;

    #[test]
    fn new_starts_at_zero() {
        let p = PropertyRecord::new("Byt #1", PropertyKind::Apartment, Some("Praha".into()));
        assert_eq!(p.value, 0);
        assert_eq!(p.debt, 0);
        assert_eq!(p.rent, 0);
        assert_eq!(p.mortgage_payment, 0);
    }

    #[test]
    fn new_assigns_distinct_ids() {
        let a = PropertyRecord::new("A", PropertyKind::House, None);
        let b = PropertyRecord::new("B", PropertyKind::House, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn equity_is_value_minus_debt() {
        let mut p = PropertyRecord::new("Byt", PropertyKind::Apartment, None);
        p.value = 7_450_000;
        p.debt = 2_000_000;
        assert_eq!(p.equity(), 5_450_000);
    }

    #[test]
    fn equity_may_be_negative() {
        let mut p = PropertyRecord::new("Byt", PropertyKind::Apartment, None);
        p.value = 100;
        p.debt = 250;
        assert_eq!(p.equity(), -150);
    }

    #[test]
    fn cashflow_is_rent_minus_mortgage() {
        let mut p = PropertyRecord::new("Byt", PropertyKind::Apartment, None);
        p.rent = 25_000;
        p.mortgage_payment = 18_000;
        assert_eq!(p.cashflow(), 7_000);
    }

    #[test]
    fn cashflow_may_be_negative() {
        let mut p = PropertyRecord::new("Byt", PropertyKind::Apartment, None);
        p.rent = 10_000;
        p.mortgage_payment = 18_000;
        assert_eq!(p.cashflow(), -8_000);
    }

    #[test]
    fn serde_roundtrip() {
        let mut p = PropertyRecord::new("Dům", PropertyKind::House, None);
        p.value = 12_000_000;
        let json = serde_json::to_string(&p).unwrap();
        let back: PropertyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn serde_missing_amounts_default_to_zero() {
        let json = format!(
            r#"{{"id":"{}","name":"Byt","kind":"apartment"}}"#,
            uuid::Uuid::new_v4()
        );
        let p: PropertyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(p.value, 0);
        assert_eq!(p.debt, 0);
        assert_eq!(p.rent, 0);
        assert_eq!(p.mortgage_payment, 0);
        assert_eq!(p.location, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Default portfolio (seed set)
// ═══════════════════════════════════════════════════════════════════

mod default_set {
    use super::*;

    #[test]
    fn has_four_records() {
        assert_eq!(default_portfolio().len(), 4);
    }

    #[test]
    fn three_apartments_in_praha_one_house() {
        let set = default_portfolio();
        let apartments: Vec<_> = set
            .iter()
            .filter(|p| p.kind == PropertyKind::Apartment)
            .collect();
        let houses: Vec<_> = set.iter().filter(|p| p.kind == PropertyKind::House).collect();

        assert_eq!(apartments.len(), 3);
        assert!(apartments.iter().all(|p| p.location.as_deref() == Some("Praha")));
        assert_eq!(houses.len(), 1);
        assert_eq!(houses[0].location, None);
    }

    #[test]
    fn all_amounts_zero() {
        for p in default_portfolio() {
            assert_eq!(p.value, 0, "{}", p.name);
            assert_eq!(p.debt, 0, "{}", p.name);
            assert_eq!(p.rent, 0, "{}", p.name);
            assert_eq!(p.mortgage_payment, 0, "{}", p.name);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  EquityHistory
// ═══════════════════════════════════════════════════════════════════

mod equity_history {
    use super::*;

    #[test]
    fn starts_empty() {
        let h = EquityHistory::new();
        assert!(h.is_empty());
        assert_eq!(h.len(), 0);
        assert!(h.latest().is_none());
    }

    #[test]
    fn upsert_inserts_in_date_order() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 3, 10), 300);
        h.upsert(d(2025, 3, 1), 100);
        h.upsert(d(2025, 3, 5), 200);

        let dates: Vec<_> = h.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2025, 3, 1), d(2025, 3, 5), d(2025, 3, 10)]);
    }

    #[test]
    fn upsert_same_date_replaces() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 3, 1), 100);
        h.upsert(d(2025, 3, 1), 250);

        assert_eq!(h.len(), 1);
        assert_eq!(h.points()[0].equity, 250);
    }

    #[test]
    fn at_most_one_point_per_date_after_any_sequence() {
        let mut h = EquityHistory::new();
        for (day, equity) in [(1, 10), (2, 20), (1, 30), (3, 40), (2, 50), (1, 60)] {
            h.upsert(d(2025, 1, day), equity);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.get(d(2025, 1, 1)).unwrap().equity, 60);
        assert_eq!(h.get(d(2025, 1, 2)).unwrap().equity, 50);
        assert_eq!(h.get(d(2025, 1, 3)).unwrap().equity, 40);
    }

    #[test]
    fn negative_equity_allowed() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 1, 1), -500_000);
        assert_eq!(h.latest().unwrap().equity, -500_000);
    }

    #[test]
    fn from_points_sorts_and_keeps_last_write_per_date() {
        let points = vec![
            EquityHistoryPoint { date: d(2025, 2, 2), equity: 2 },
            EquityHistoryPoint { date: d(2025, 2, 1), equity: 1 },
            EquityHistoryPoint { date: d(2025, 2, 2), equity: 22 },
        ];
        let h = EquityHistory::from_points(points);
        assert_eq!(h.len(), 2);
        assert_eq!(h.points()[0], EquityHistoryPoint { date: d(2025, 2, 1), equity: 1 });
        assert_eq!(h.points()[1], EquityHistoryPoint { date: d(2025, 2, 2), equity: 22 });
    }

    #[test]
    fn clamp_oldest_drops_from_the_front() {
        let mut h = EquityHistory::new();
        for day in 1..=10 {
            h.upsert(d(2025, 1, day), i64::from(day));
        }
        let removed = h.clamp_oldest(7);
        assert_eq!(removed, 3);
        assert_eq!(h.len(), 7);
        assert_eq!(h.points()[0].date, d(2025, 1, 4));
        assert_eq!(h.latest().unwrap().date, d(2025, 1, 10));
    }

    #[test]
    fn clamp_oldest_noop_when_within_bound() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 1, 1), 1);
        assert_eq!(h.clamp_oldest(5), 0);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn max_points_is_ten_years_of_days() {
        assert_eq!(MAX_HISTORY_POINTS, 3650);
    }

    #[test]
    fn clear_empties_the_series() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 1, 1), 1);
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let mut h = EquityHistory::new();
        h.upsert(d(2025, 1, 1), 100);
        h.upsert(d(2025, 1, 2), -50);
        let json = serde_json::to_string(&h).unwrap();
        let back: EquityHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DraftRow
// ═══════════════════════════════════════════════════════════════════

mod draft_row {
    use super::*;

    #[test]
    fn from_record_mirrors_amounts_as_text() {
        let mut p = PropertyRecord::new("Byt", PropertyKind::Apartment, None);
        p.value = 7_450_000;
        p.debt = 2_000_000;
        p.rent = 25_000;
        p.mortgage_payment = 18_000;

        let row = DraftRow::from_record(&p);
        assert_eq!(row.value, "7450000");
        assert_eq!(row.debt, "2000000");
        assert_eq!(row.rent, "25000");
        assert_eq!(row.mortgage_payment, "18000");
    }

    #[test]
    fn zeroed_has_explicit_zeros() {
        let row = DraftRow::zeroed();
        assert_eq!(row.value, "0");
        assert_eq!(row.debt, "0");
        assert_eq!(row.rent, "0");
        assert_eq!(row.mortgage_payment, "0");
    }

    #[test]
    fn default_is_empty_text() {
        let row = DraftRow::default();
        assert!(row.value.is_empty());
        assert!(row.debt.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Identity & PortfolioTotals
// ═══════════════════════════════════════════════════════════════════

mod identity {
    use super::*;

    #[test]
    fn new_has_no_email() {
        let id = Identity::new("user-1");
        assert_eq!(id.id, "user-1");
        assert_eq!(id.email, None);
    }

    #[test]
    fn with_email() {
        let id = Identity::with_email("user-1", "a@b.cz");
        assert_eq!(id.email.as_deref(), Some("a@b.cz"));
    }

    #[test]
    fn serde_missing_email_defaults_to_none() {
        let id: Identity = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(id.email, None);
    }
}

mod totals {
    use super::*;

    #[test]
    fn default_is_all_zero() {
        let t = PortfolioTotals::default();
        assert_eq!(t.total_value, 0);
        assert_eq!(t.total_equity, 0);
        assert_eq!(t.net_cashflow, 0);
    }
}
