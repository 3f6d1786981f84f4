//! Chatdesk Core
//!
//! Client-side coordination for the chat application: configuration, the
//! persisted session and the navigation guard live behind one [`Client`].

mod client;
mod config;
mod error;

pub use client::Client;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use chatdesk_navigation::{route_path, GuardDecision, NavigationError, RouteGuard};
pub use chatdesk_session::{
    LoadOutcome, MalformedState, SessionError, SessionRecord, SessionStore, SESSION_KEY,
};
pub use chatdesk_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
