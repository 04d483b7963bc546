//! HTTP-specific error types for the Etsy API SDK.
//!
//! This module contains error types for HTTP operations: transport faults,
//! non-2xx responses, and request validation failures.
//!
//! # Error Handling
//!
//! - [`TransportError`]: No HTTP response could be obtained at all
//! - [`RequestError`]: The API answered with a non-2xx status
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use etsy_api::clients::HttpError;
//!
//! match client.get("/application/shops/123", Params::new()).await {
//!     Ok(envelope) => println!("Fetched {}", envelope.uri()),
//!     Err(HttpError::Request(e)) => println!("API error {}: {}", e.status, e),
//!     Err(HttpError::Transport(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when no HTTP response was obtainable (DNS, connection, TLS).
///
/// Transport errors are propagated to the caller unchanged; nothing in the
/// SDK retries them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The reqwest client failed to complete the exchange.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A custom [`Transport`](crate::clients::Transport) failed.
    #[error("Transport error: {0}")]
    Other(String),
}

/// Error returned when an API request receives a non-successful response.
///
/// The message mirrors what Etsy sent: the `error` field of the JSON body
/// when present, otherwise the raw body.
///
/// # Example
///
/// ```rust
/// use etsy_api::clients::RequestError;
///
/// let error = RequestError {
///     status: 403,
///     error: Some("Invalid API key".to_string()),
///     body: r#"{"error":"Invalid API key"}"#.to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     r#"Received HTTP status code [403] with error "Invalid API key"."#
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Received HTTP status code [{status}] {}", describe(.error.as_deref(), .body))]
pub struct RequestError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The provider's `error` string, if the body carried one.
    pub error: Option<String>,
    /// The raw response body.
    pub body: String,
}

impl RequestError {
    /// Builds a `RequestError` from a status code and raw response body.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        Self {
            status,
            error: provider_error(body),
            body: body.to_string(),
        }
    }
}

fn describe(error: Option<&str>, body: &str) -> String {
    match error {
        Some(error) => format!("with error \"{error}\"."),
        None => format!("with body {body}"),
    }
}

/// Extracts a non-empty `error` string from a JSON body.
pub(crate) fn provider_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a method that sends parameters as a query string.
    #[error("Cannot send a request body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method of the request.
        method: String,
    },

    /// The request URL is not absolute.
    #[error("Request URL '{url}' must be absolute.")]
    RelativeUrl {
        /// The offending URL.
        url: String,
    },

    /// An `image` parameter could not be turned into a file part.
    #[error("Cannot read upload file '{path}': {reason}")]
    UnreadableFile {
        /// The path or parameter name that was given.
        path: String,
        /// Why it could not be read.
        reason: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use etsy_api::HttpError;
///
/// match result {
///     Ok(envelope) => { /* handle success */ }
///     Err(HttpError::Request(e)) => { /* handle API error */ }
///     Err(HttpError::Transport(e)) => { /* handle network error */ }
///     Err(HttpError::InvalidRequest(e)) => { /* handle validation error */ }
///     Err(HttpError::InvalidBody { .. }) => { /* handle malformed JSON */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// No HTTP response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful response carried a body that is not valid JSON.
    #[error("Invalid JSON body received from {uri}: {source}")]
    InvalidBody {
        /// The URI that was requested.
        uri: String,
        /// The decoding error.
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(TransportError::Network(error))
    }
}
