//! Main client state container
//!
//! Owns configuration, the persisted session and the route guard. Everything
//! runs on the caller's thread; the session is reconciled with storage only at
//! construction, on [`Client::reload_session`], and on explicit saves.

use chatdesk_navigation::{GuardDecision, RouteGuard};
use chatdesk_session::{LoadOutcome, SessionRecord, SessionStore};
use chatdesk_storage::{Database, KeyValueStore};
use url::Url;

use crate::config::Config;
use crate::Result;

pub struct Client<S = Database> {
    config: Config,
    sessions: SessionStore<S>,
    guard: RouteGuard,
}

impl Client<Database> {
    /// Open the on-disk local storage named by `config` and load the session
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_storage(config, db)
    }
}

impl<S: KeyValueStore> Client<S> {
    pub fn with_storage(config: Config, storage: S) -> Result<Self> {
        let sessions = SessionStore::new(storage)?;
        let guard = RouteGuard::new(config.login_path.clone());

        tracing::info!(
            load = ?sessions.last_load(),
            authenticated = sessions.is_authenticated(),
            "Client started"
        );

        Ok(Self {
            config,
            sessions,
            guard,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionRecord {
        self.sessions.record()
    }

    /// Mutate session fields in memory; call [`Client::save_session`] to persist
    pub fn session_mut(&mut self) -> &mut SessionRecord {
        self.sessions.record_mut()
    }

    pub fn session_store(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn save_session(&self) -> Result<()> {
        self.sessions.save()?;
        Ok(())
    }

    pub fn reload_session(&mut self) -> Result<LoadOutcome> {
        Ok(self.sessions.load()?)
    }

    /// Store credentials from a successful login and persist them.
    ///
    /// If the write fails the in-memory session is rolled back, so the client
    /// never counts as signed in without a stored credential.
    pub fn sign_in(&mut self, access_token: String, username: String) -> Result<()> {
        let previous = self.sessions.record().clone();

        let record = self.sessions.record_mut();
        record.access_token = Some(access_token);
        record.username = Some(username);

        if let Err(e) = self.sessions.save() {
            *self.sessions.record_mut() = previous;
            tracing::warn!(error = %e, "Sign-in not persisted, session rolled back");
            return Err(e.into());
        }

        tracing::info!(username = ?self.session().username, "Signed in");

        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.sessions.clear()?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub fn route_guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Guard a navigation against the current session
    pub fn guard(&self, to: &str, from: Option<&str>) -> Result<GuardDecision> {
        Ok(self.guard.check(to, from, self.sessions.record())?)
    }

    /// Workspace selected in the session, else the configured default
    pub fn active_workspace_id(&self) -> Option<&str> {
        self.session()
            .workspace_id
            .as_deref()
            .or(self.config.default_workspace_id.as_deref())
    }

    pub fn socket_url(&self) -> Result<Url> {
        self.config.socket_url()
    }
}
