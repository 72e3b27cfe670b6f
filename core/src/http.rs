//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `build_*` methods on `AccountsClient` produce `HttpRequest` values and
//! `parse_response` consumes `HttpResponse` values without touching the
//! network. A `Transport` performs the actual round trip in between.
//!
//! Every request against the accounts service is a GET, so `HttpRequest`
//! carries no method.

/// Name of the header carrying the static credential.
pub const AUTHORIZATION: &str = "Authorization";

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`, then passed
/// to `AccountsClient::parse_response` for status handling and decoding.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Convenience constructor for a response without headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Which status codes an operation treats as service errors.
///
/// The accounts API is inconsistent here and callers depend on it: the
/// customer and customer-orders lookups reject anything but 200, while every
/// other operation only special-cases client errors and lets 5xx bodies fall
/// through to the success decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any status other than 200 is an error.
    OkOnly,
    /// Only `[400, 500)` is an error.
    ClientErrors,
}

impl StatusPolicy {
    pub fn is_error(self, status: u16) -> bool {
        match self {
            StatusPolicy::OkOnly => status != 200,
            StatusPolicy::ClientErrors => (400..500).contains(&status),
        }
    }
}
