pub mod format_service;
pub mod reconcile_service;
