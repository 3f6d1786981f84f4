//! Session Store
//!
//! Mirrors a [`SessionRecord`] into the `"session"` slot of a key-value
//! backend. Loading happens once at construction and again only on request;
//! nothing is written back until [`SessionStore::save`] is called.

use serde_json::Value;

use chatdesk_storage::KeyValueStore;

use crate::record::SessionRecord;
use crate::Result;

/// Storage key holding the serialized session
pub const SESSION_KEY: &str = "session";

const EMPTY_SESSION: &str = "{}";

/// Stored content that could not be read as a session object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedState {
    pub reason: String,
}

/// What a load found in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The slot was missing (or empty) and has been initialized to `{}`
    Initialized,
    /// The slot held a session object and the record was read from it
    Restored,
    /// The slot held malformed content. The record was left untouched and
    /// the stored content was not rewritten.
    Absorbed(MalformedState),
}

impl LoadOutcome {
    pub fn is_absorbed(&self) -> bool {
        matches!(self, LoadOutcome::Absorbed(_))
    }
}

pub struct SessionStore<S> {
    storage: S,
    record: SessionRecord,
    last_load: LoadOutcome,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a store with every field unset, then load from `storage`.
    ///
    /// Only backend failures are returned as errors; malformed stored content
    /// shows up in [`SessionStore::last_load`].
    pub fn new(storage: S) -> Result<Self> {
        let mut store = Self {
            storage,
            record: SessionRecord::default(),
            last_load: LoadOutcome::Initialized,
        };
        store.load()?;
        Ok(store)
    }

    /// Read the session slot into the in-memory record
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let (raw, initialized) = match self.storage.get_item(SESSION_KEY)? {
            Some(raw) if !raw.is_empty() => (raw, false),
            _ => {
                self.storage.set_item(SESSION_KEY, EMPTY_SESSION)?;
                tracing::debug!(key = SESSION_KEY, "Initialized empty session slot");
                (EMPTY_SESSION.to_string(), true)
            }
        };

        let outcome = match parse_session(&raw) {
            Ok(record) => {
                self.record = record;
                if initialized {
                    LoadOutcome::Initialized
                } else {
                    LoadOutcome::Restored
                }
            }
            Err(malformed) => {
                tracing::error!(key = SESSION_KEY, reason = %malformed.reason, "Session error");
                tracing::info!("Could not load stored session, continuing without one");
                LoadOutcome::Absorbed(malformed)
            }
        };

        tracing::debug!(
            outcome = ?outcome,
            authenticated = self.record.is_authenticated(),
            "Loaded session"
        );

        self.last_load = outcome.clone();
        Ok(outcome)
    }

    /// Write the current record to the session slot, replacing what was there
    pub fn save(&self) -> Result<()> {
        let payload = self.record.to_pretty_json()?;
        self.storage.set_item(SESSION_KEY, &payload)?;

        tracing::debug!(
            key = SESSION_KEY,
            bytes = payload.len(),
            authenticated = self.record.is_authenticated(),
            "Saved session"
        );

        Ok(())
    }

    /// Unset every field and persist the empty session
    pub fn clear(&mut self) -> Result<()> {
        self.record.clear();
        self.save()?;

        tracing::info!("Cleared session");

        Ok(())
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut SessionRecord {
        &mut self.record
    }

    pub fn is_authenticated(&self) -> bool {
        self.record.is_authenticated()
    }

    /// Outcome of the most recent load
    pub fn last_load(&self) -> &LoadOutcome {
        &self.last_load
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn parse_session(raw: &str) -> std::result::Result<SessionRecord, MalformedState> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => Ok(SessionRecord::from_object(&object)),
        Ok(other) => Err(MalformedState {
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(e) => Err(MalformedState {
            reason: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
