//! Chatdesk Session Management
//!
//! - A session is six optional fields: credentials plus the active chat context
//! - It lives in one storage slot, `"session"`, as a JSON object
//! - Memory and storage meet only at load (construction) and explicit save
//! - Corrupt stored content never fails a load; it is reported as
//!   [`LoadOutcome::Absorbed`] instead

mod error;
mod record;
mod store;

pub use error::SessionError;
pub use record::SessionRecord;
pub use store::{LoadOutcome, MalformedState, SessionStore, SESSION_KEY};

pub type Result<T> = std::result::Result<T, SessionError>;
