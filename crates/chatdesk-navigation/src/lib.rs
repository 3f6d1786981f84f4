//! Chatdesk Navigation
//!
//! Every navigation passes through the [`RouteGuard`]:
//! 1. Protected path, no session credential → redirect to login
//! 2. Anything else → proceed

mod error;
mod guard;

pub use error::NavigationError;
pub use guard::{route_path, GuardDecision, RouteGuard};

pub type Result<T> = std::result::Result<T, NavigationError>;
