//! Runtime configuration for the terminal binary.
//!
//! Values come from defaults, then environment variables, then CLI flags
//! (later wins).
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PROJTERM_API_URL` | `api_url` |
//! | `PROJTERM_SESSION` | `session_id` |
//! | `PROJTERM_TOKEN` | `auth_token` |
//! | `PROJTERM_TIMEOUT_SECS` | `command_timeout` |
//! | `PROJTERM_DEDUP_WINDOW` | `dedup_window` |
//! | `PROJTERM_HOME` | `home_path` |
//! | `PROJTERM_EXPORT_DIR` | `export_dir` |

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::WorkingPath;
use crate::session::{SessionOptions, DEFAULT_COMMAND_TIMEOUT, DEFAULT_DEDUP_WINDOW};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration for one terminal run.
///
/// # Example
///
/// ```ignore
/// use projterm::config::TerminalConfig;
///
/// let config = TerminalConfig::from_env()
///     .with_session_id("web-app")
///     .with_command_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    /// Base URL of the project API
    pub api_url: String,
    /// Session to attach to (required to run)
    pub session_id: Option<String>,
    /// Bearer token sent with API requests
    pub auth_token: Option<String>,
    pub command_timeout: Duration,
    /// Recent log events remembered for duplicate suppression (0 disables)
    pub dedup_window: usize,
    /// Starting path and target of a bare `cd`
    pub home_path: String,
    /// Where exports are written (default: downloads or home directory)
    pub export_dir: Option<PathBuf>,
    /// Cap for log stream reconnect backoff
    pub max_backoff: Duration,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_id: None,
            auth_token: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            dedup_window: DEFAULT_DEDUP_WINDOW,
            home_path: "/".to_string(),
            export_dir: None,
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl TerminalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_dedup_window(mut self, window: usize) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = path.into();
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Unparseable numbers are logged
    /// and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("PROJTERM_API_URL") {
            config.api_url = url;
        }
        config.session_id = lookup("PROJTERM_SESSION").filter(|s| !s.is_empty());
        config.auth_token = lookup("PROJTERM_TOKEN").filter(|s| !s.is_empty());
        if let Some(secs) = parse_number::<u64>(&lookup, "PROJTERM_TIMEOUT_SECS") {
            config.command_timeout = Duration::from_secs(secs);
        }
        if let Some(window) = parse_number::<usize>(&lookup, "PROJTERM_DEDUP_WINDOW") {
            config.dedup_window = window;
        }
        if let Some(home) = lookup("PROJTERM_HOME") {
            config.home_path = home;
        }
        config.export_dir = lookup("PROJTERM_EXPORT_DIR").map(PathBuf::from);
        config
    }

    /// Session tunables derived from this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            home: WorkingPath::parse(&self.home_path),
            command_timeout: self.command_timeout,
            dedup_window: self.dedup_window,
            ..SessionOptions::default()
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.command_timeout, Duration::from_secs(120));
        assert_eq!(config.dedup_window, 256);
        assert!(config.session_id.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = TerminalConfig::from_lookup(lookup_from(&[
            ("PROJTERM_API_URL", "https://api.example.com"),
            ("PROJTERM_SESSION", "web-app"),
            ("PROJTERM_TIMEOUT_SECS", "15"),
            ("PROJTERM_DEDUP_WINDOW", "0"),
            ("PROJTERM_HOME", "/srv/app"),
        ]));
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.session_id.as_deref(), Some("web-app"));
        assert_eq!(config.command_timeout, Duration::from_secs(15));
        assert_eq!(config.dedup_window, 0);
        assert_eq!(config.session_options().home.to_string(), "/srv/app");
    }

    #[test]
    fn test_bad_numbers_keep_defaults() {
        let config = TerminalConfig::from_lookup(lookup_from(&[
            ("PROJTERM_TIMEOUT_SECS", "soon"),
            ("PROJTERM_SESSION", ""),
        ]));
        assert_eq!(config.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert!(config.session_id.is_none());
    }

    #[test]
    fn test_builder() {
        let config = TerminalConfig::new()
            .with_session_id("s")
            .with_dedup_window(8)
            .with_export_dir("/tmp");
        assert_eq!(config.session_id.as_deref(), Some("s"));
        assert_eq!(config.session_options().dedup_window, 8);
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp")));
    }
}
