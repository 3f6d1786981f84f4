//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the local storage database
    pub database_path: PathBuf,
    /// Where unauthenticated navigation is sent
    pub login_path: String,
    /// Chat socket host
    pub socket_host: String,
    pub socket_port: Option<u16>,
    /// Connect over TLS
    pub socket_ssl: bool,
    pub socket_namespace: Option<String>,
    /// Workspace used until the session selects one
    pub default_workspace_id: Option<String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("chatdesk.db"),
            login_path: "/login".to_string(),
            socket_host: "localhost".to_string(),
            socket_port: None,
            socket_ssl: false,
            socket_namespace: None,
            default_workspace_id: None,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("chatdesk"))
            .unwrap_or_else(|| PathBuf::from(".chatdesk"))
    }

    /// Defaults overridden by `SOCKET_*`, `DEFAULT_WORKSPACE_ID` and
    /// `CHATDESK_DATA_DIR` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = var("CHATDESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::data_dir);
        let mut config = Self::new(data_dir);

        if let Some(host) = var("SOCKET_HOST") {
            config.socket_host = host;
        }
        if let Some(port) = var("SOCKET_PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| CoreError::Config(format!("SOCKET_PORT is not a port: {port}")))?;
            config.socket_port = Some(port);
        }
        if let Some(ssl) = var("SOCKET_SSL") {
            config.socket_ssl = parse_flag(&ssl)
                .ok_or_else(|| CoreError::Config(format!("SOCKET_SSL is not a boolean: {ssl}")))?;
        }
        config.socket_namespace = var("SOCKET_NAMESPACE");
        config.default_workspace_id = var("DEFAULT_WORKSPACE_ID");

        Ok(config)
    }

    /// Address of the chat socket endpoint
    pub fn socket_url(&self) -> Result<Url> {
        let scheme = if self.socket_ssl { "https" } else { "http" };
        let mut url = Url::parse(&format!("{scheme}://{}", self.socket_host)).map_err(|e| {
            CoreError::Config(format!("Invalid socket host {}: {e}", self.socket_host))
        })?;

        if self.socket_port.is_some() {
            url.set_port(self.socket_port)
                .map_err(|_| CoreError::Config("Socket host cannot carry a port".to_string()))?;
        }
        if let Some(namespace) = &self.socket_namespace {
            url.set_path(&format!("/{}", namespace.trim_start_matches('/')));
        }

        Ok(url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("CHATDESK_DATA_DIR", "/tmp/chatdesk")])).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/chatdesk/chatdesk.db"));
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.socket_host, "localhost");
        assert!(!config.socket_ssl);
        assert!(config.default_workspace_id.is_none());
        assert_eq!(config.socket_url().unwrap().as_str(), "http://localhost/");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SOCKET_HOST", "chat.example.com"),
            ("SOCKET_PORT", "8443"),
            ("SOCKET_SSL", "true"),
            ("SOCKET_NAMESPACE", "/chat"),
            ("DEFAULT_WORKSPACE_ID", "ws-default"),
            ("CHATDESK_DATA_DIR", "/tmp/chatdesk"),
        ]))
        .unwrap();

        assert_eq!(config.socket_port, Some(8443));
        assert!(config.socket_ssl);
        assert_eq!(config.default_workspace_id.as_deref(), Some("ws-default"));
        assert_eq!(
            config.socket_url().unwrap().as_str(),
            "https://chat.example.com:8443/chat"
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("SOCKET_HOST", "  "),
            ("SOCKET_NAMESPACE", ""),
        ]))
        .unwrap();

        assert_eq!(config.socket_host, "localhost");
        assert!(config.socket_namespace.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup(&[("SOCKET_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = Config::from_lookup(lookup(&[("SOCKET_SSL", "maybe")])).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let mut config = Config::new(PathBuf::from("/tmp"));
        config.socket_host = "bad host".to_string();
        assert!(matches!(config.socket_url(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = Config::new(PathBuf::from("/tmp/chatdesk"));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
