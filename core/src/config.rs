//! Client configuration resolved once at startup.
//!
//! # Design
//! Base URL, timeout and authorization header live on an immutable
//! `ClientConfig` that is handed to `AccountsClient` at construction.
//! `from_env` reads the process environment; `from_lookup` takes any
//! key lookup so tests never mutate global state.

use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "ACCOUNTS_SERVICE_API_URL";
pub const TIMEOUT_ENV: &str = "ACCOUNTS_SERVICE_TIMEOUT";
pub const AUTHORIZATION_ENV: &str = "AUTHORIZATION_HEADER";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root without a trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Upper bound on a single request, connect through body read.
    pub timeout: Duration,
    /// Sent verbatim as the `Authorization` header. Never `Some("")`.
    authorization: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            authorization: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the static authorization value. An empty value clears it.
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.authorization = (!value.is_empty()).then_some(value);
        self
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Resolve configuration from `ACCOUNTS_SERVICE_API_URL`,
    /// `ACCOUNTS_SERVICE_TIMEOUT` and `AUTHORIZATION_HEADER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup. Unset and
    /// empty values are treated alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let base_url = get(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match get(TIMEOUT_ENV) {
            Some(raw) => parse_timeout(&raw)?,
            None => {
                info!(timeout = ?DEFAULT_TIMEOUT, "using default accounts service timeout");
                DEFAULT_TIMEOUT
            }
        };

        let config = Self::new(&base_url).with_timeout(timeout);
        Ok(match get(AUTHORIZATION_ENV) {
            Some(value) => config.with_authorization(value),
            None => config,
        })
    }
}

/// Parse a duration string such as `30s`, `1m30s` or `500ms`.
///
/// A zero duration is rejected: it would disable the timeout entirely.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let timeout = humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigError::InvalidTimeout {
            value: raw.to_string(),
            source,
        }
    })?;
    if timeout.is_zero() {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(timeout)
}
