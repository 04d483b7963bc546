//! The transport seam between the SDK and the network.
//!
//! Everything that talks HTTP goes through a [`Transport`]. The SDK ships
//! [`HttpClient`](crate::clients::HttpClient) as the default; applications
//! can supply their own to proxy, record, or sandbox traffic.

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Sends a fully resolved [`HttpRequest`] and returns the raw response.
///
/// Implementations must return every HTTP response they receive, whatever
/// its status. Only failures that produce no response at all (DNS,
/// connection refused, TLS) are reported as [`TransportError`].
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use async_trait::async_trait;
/// use etsy_api::clients::{HttpRequest, HttpResponse, Transport, TransportError};
///
/// struct AlwaysEmpty;
///
/// #[async_trait]
/// impl Transport for AlwaysEmpty {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(200, HashMap::new(), r#"{"count":0,"results":[]}"#))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
