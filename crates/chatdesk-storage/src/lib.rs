//! Chatdesk Storage Layer
//!
//! Key-value persistence standing in for browser local storage.
//! Callers receive a [`KeyValueStore`] handle instead of reaching for ambient
//! global state, so every component can be pointed at its own backend.

mod database;
mod error;
mod memory;
mod migrations;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed, string-valued storage capability.
///
/// Mirrors the local storage contract: reads of a missing key yield `None`,
/// writes overwrite unconditionally. Implementations are cheap handles; a
/// clone refers to the same underlying data.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}
