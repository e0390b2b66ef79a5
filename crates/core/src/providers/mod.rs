pub mod traits;

// Backend implementations
pub mod remote_session;
pub mod remote_store;
pub mod static_session;
