//! Error types for the accounts client.
//!
//! # Design
//! Three fault families reach the caller: transport failures (returned
//! as-is from `ureq`), service failures (an error-range status whose body
//! decodes into `ServiceError`), and decode failures of the success body.
//! `EmptyResult` covers lookups that pick the first element of a filtered
//! collection and find none.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error body reported by the accounts service.
///
/// Every field defaults, so a body that does not match this shape still
/// yields a (mostly empty) value. Displays as `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ServiceError {
    /// Machine-readable error code, e.g. `not_found`.
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    /// Per-field validation failures, when the service reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failures: Option<Vec<Map<String, Value>>>,
}

/// Errors returned by `AccountsClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an error-range status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Building or executing the request failed (bad URL, refused
    /// connection, timeout).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A request parameter could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A lookup expecting at least one element got an empty collection.
    #[error("{resource} query returned no results")]
    EmptyResult { resource: &'static str },
}

impl ApiError {
    /// The service-reported error, if this is one.
    pub fn service(&self) -> Option<&ServiceError> {
        match self {
            ApiError::Service(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors raised while resolving `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ACCOUNTS_SERVICE_TIMEOUT {value:?}: {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("ACCOUNTS_SERVICE_TIMEOUT must be greater than zero")]
    ZeroTimeout,
}
