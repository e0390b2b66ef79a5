pub mod draft;
pub mod history;
pub mod identity;
pub mod property;
pub mod totals;
