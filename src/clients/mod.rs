//! HTTP client types for Etsy API communication.
//!
//! This module provides the request plumbing shared by every endpoint:
//! building requests, sending them through a [`Transport`], throttling on
//! Etsy's quota headers, and classifying responses into an [`Envelope`] or
//! an [`HttpError`].
//!
//! # Overview
//!
//! - [`RequestDispatcher`]: Resolves paths, attaches auth headers, sends, throttles, classifies
//! - [`Transport`]: The seam to the network; [`HttpClient`] is the reqwest implementation
//! - [`HttpRequest`] / [`HttpResponse`]: Transport-level request and response
//! - [`Params`]: Ordered request parameters (query, form, or single-file multipart)
//! - [`RateLimiter`]: Computes the post-response throttle delay
//! - [`Envelope`]: A decoded 2xx body or a soft 404, stamped with the request URI
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use etsy_api::clients::{HttpClient, Params, RequestDispatcher};
//!
//! let transport = Arc::new(HttpClient::new(Some(&config)));
//! let dispatcher = RequestDispatcher::new(&config, transport);
//!
//! let envelope = dispatcher
//!     .get("/application/openapi-ping", Params::new())
//!     .await?;
//! println!("{}", envelope.to_value());
//! ```
//!
//! # Rate Limiting
//!
//! After every 2xx response the calling task sleeps for
//! `max(0, 8 - x-remaining-this-second) * 100ms`. Errors are never retried.

mod dispatcher;
mod envelope;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod params;
mod rate_limit;
mod transport;

pub use dispatcher::RequestDispatcher;
pub use envelope::Envelope;
pub use errors::{HttpError, InvalidHttpRequestError, RequestError, TransportError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::{HttpResponse, RateLimitInfo, REMAINING_THIS_SECOND};
pub use params::{ParamValue, Params, IMAGE_PARAM};
pub use rate_limit::{RateLimiter, DEFAULT_REMAINING, DEFAULT_STEP, DEFAULT_THRESHOLD};
pub use transport::Transport;

pub(crate) use errors::provider_error;
pub(crate) use http_request::encode_pairs;
