//! Route guard
//!
//! Runs before every navigation. Protected routes require a session with an
//! access token; without one, navigation is sent to the login route.

use serde::{Deserialize, Serialize};
use url::Url;

use chatdesk_session::SessionRecord;

use crate::error::NavigationError;
use crate::Result;

const ROUTE_BASE: &str = "http://chatdesk.local/";

/// Result of guarding a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "path", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Let the navigation through
    Proceed,
    /// Navigate here instead
    Redirect(String),
}

pub struct RouteGuard {
    login_path: String,
    protected_paths: Vec<String>,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            // Only the chat landing page requires a session by default
            protected_paths: vec!["/".to_string()],
        }
    }

    pub fn with_protected_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.protected_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn protected_paths(&self) -> &[String] {
        &self.protected_paths
    }

    pub fn is_protected(&self, path: &str) -> bool {
        path != self.login_path && self.protected_paths.iter().any(|p| p == path)
    }

    /// Decide whether navigation from `from` to `to` may proceed
    pub fn check(
        &self,
        to: &str,
        from: Option<&str>,
        session: &SessionRecord,
    ) -> Result<GuardDecision> {
        tracing::debug!(to = %to, from = ?from, "Guarding navigation");

        let path = route_path(to)?;

        if self.is_protected(&path) && !session.is_authenticated() {
            tracing::info!(
                path = %path,
                login = %self.login_path,
                "No session, redirecting to login"
            );
            return Ok(GuardDecision::Redirect(self.login_path.clone()));
        }

        Ok(GuardDecision::Proceed)
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new("/login")
    }
}

/// Extract the normalized path of a route target.
///
/// Accepts app-relative targets (`/chat?id=1#top`) and absolute URLs. Query
/// and fragment are dropped; a trailing slash is removed except on the root.
pub fn route_path(target: &str) -> Result<String> {
    let target = target.trim();

    let url = if target.starts_with('/') {
        Url::parse(ROUTE_BASE).and_then(|base| base.join(target))
    } else {
        Url::parse(target)
    }
    .map_err(|_| NavigationError::InvalidRoute(target.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(NavigationError::InvalidRoute(target.to_string()));
    }

    let path = url.path();
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    Ok(path.to_string())
}
