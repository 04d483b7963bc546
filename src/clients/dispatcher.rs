//! The request dispatcher.
//!
//! [`RequestDispatcher`] is the single place where Etsy requests are built,
//! sent, throttled, and classified. Every endpoint method in the SDK is a
//! thin caller of [`RequestDispatcher::dispatch`].
//!
//! # Classification
//!
//! | Outcome                                  | Result                                 |
//! |------------------------------------------|----------------------------------------|
//! | 2xx                                      | `Ok(Envelope::Data)` after throttling  |
//! | 404 with `404_error` unset               | `Ok(Envelope::NotFound)`               |
//! | any other non-2xx                        | `Err(HttpError::Request)`              |
//! | no response at all                       | `Err(HttpError::Transport)`            |
//!
//! Nothing is retried.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::clients::envelope::Envelope;
use crate::clients::errors::{provider_error, HttpError, InvalidHttpRequestError, RequestError};
use crate::clients::http_request::{FilePart, HttpMethod, HttpRequest, RequestBody};
use crate::clients::params::{ParamValue, Params, IMAGE_PARAM};
use crate::clients::rate_limit::RateLimiter;
use crate::clients::transport::Transport;
use crate::config::{ApiKey, ClientId, EndpointUrl, EtsyConfig, RequestOptions};

#[derive(Debug)]
struct DispatchState {
    auth_headers: Vec<(String, String)>,
    options: RequestOptions,
}

/// Sends requests to the Etsy API and normalizes the responses.
///
/// Relative paths (anything not starting with `http`) are resolved against
/// the configured API URL and sent with the `x-api-key` and
/// `Authorization: Bearer` headers. Absolute URLs are sent untouched.
///
/// # Thread Safety
///
/// The auth headers and [`RequestOptions`] sit behind a read/write lock.
/// [`set_api_key`](Self::set_api_key) and [`set_config`](Self::set_config)
/// take the write side; each dispatch snapshots both under the read side
/// before sending, so a request never sees half of an update.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use etsy_api::clients::{HttpClient, Params, RequestDispatcher};
///
/// let dispatcher = RequestDispatcher::new(&config, Arc::new(HttpClient::new(Some(&config))));
/// let envelope = dispatcher
///     .get("/application/listings/active", Params::new().with("keywords", "mug"))
///     .await?;
/// ```
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
    client_id: ClientId,
    api_url: EndpointUrl,
    rate_limiter: RateLimiter,
    state: RwLock<DispatchState>,
}

// Verify RequestDispatcher is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestDispatcher>();
};

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("client_id", &self.client_id)
            .field("api_url", &self.api_url)
            .field("rate_limiter", &self.rate_limiter)
            .field("options", &self.state.read().options)
            .finish_non_exhaustive()
    }
}

impl RequestDispatcher {
    /// Creates a dispatcher from a configuration and a transport.
    ///
    /// If the configuration carries an API key, auth headers are set
    /// immediately.
    #[must_use]
    pub fn new(config: &EtsyConfig, transport: Arc<dyn Transport>) -> Self {
        let dispatcher = Self {
            transport,
            client_id: config.client_id().clone(),
            api_url: config.api_url().clone(),
            rate_limiter: RateLimiter::default(),
            state: RwLock::new(DispatchState {
                auth_headers: Vec::new(),
                options: config.options(),
            }),
        };
        if let Some(key) = config.api_key() {
            dispatcher.set_api_key(key);
        }
        dispatcher
    }

    /// Replaces the rate limiter.
    #[must_use]
    pub const fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    /// Sets the bearer token used for relative-path requests.
    pub fn set_api_key(&self, api_key: &ApiKey) {
        let headers = vec![
            ("x-api-key".to_string(), self.client_id.as_ref().to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", api_key.as_ref()),
            ),
        ];
        self.state.write().auth_headers = headers;
        tracing::debug!(user_id = api_key.user_id(), "Etsy API key updated");
    }

    /// Replaces the response classification options.
    pub fn set_config(&self, options: RequestOptions) {
        self.state.write().options = options;
    }

    /// Returns the current response classification options.
    #[must_use]
    pub fn options(&self) -> RequestOptions {
        self.state.read().options
    }

    /// Returns the client ID sent as `x-api-key`.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn get(&self, path: &str, params: Params) -> Result<Envelope, HttpError> {
        self.dispatch(HttpMethod::Get, path, params).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn post(&self, path: &str, params: Params) -> Result<Envelope, HttpError> {
        self.dispatch(HttpMethod::Post, path, params).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn put(&self, path: &str, params: Params) -> Result<Envelope, HttpError> {
        self.dispatch(HttpMethod::Put, path, params).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn patch(&self, path: &str, params: Params) -> Result<Envelope, HttpError> {
        self.dispatch(HttpMethod::Patch, path, params).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn delete(&self, path: &str, params: Params) -> Result<Envelope, HttpError> {
        self.dispatch(HttpMethod::Delete, path, params).await
    }

    /// Sends a request and classifies the response.
    ///
    /// GET and DELETE send `params` as a query string. POST, PUT and PATCH
    /// send them as a form body, unless an `image` parameter is present, in
    /// which case the body is multipart with that single file part and the
    /// remaining parameters are not sent.
    ///
    /// After a 2xx response the calling task sleeps for the delay computed
    /// by the [`RateLimiter`].
    ///
    /// # Errors
    ///
    /// - [`HttpError::Transport`] if no response was obtained
    /// - [`HttpError::Request`] for any non-2xx status other than a soft 404
    /// - [`HttpError::InvalidBody`] if a 2xx body is not valid JSON
    /// - [`HttpError::InvalidRequest`] if an `image` path cannot be read
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<Envelope, HttpError> {
        let DispatchState {
            auth_headers,
            options,
        } = self.snapshot();
        let request = self.build_request(method, path, params, auth_headers)?;
        let uri = request.full_url();

        tracing::debug!(%method, %uri, "Dispatching Etsy request");

        let response = self.transport.send(request).await?;

        if response.is_ok() {
            self.rate_limiter.throttle(&response).await;

            let data = if response.body.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&response.body).map_err(|source| HttpError::InvalidBody {
                    uri: uri.clone(),
                    source,
                })?
            };
            return Ok(Envelope::Data { data, uri });
        }

        if response.code == 404 && !options.not_found_as_error {
            let error = provider_error(&response.body);
            tracing::warn!(%uri, error = ?error, "Etsy returned 404, treating as not found");
            return Ok(Envelope::NotFound {
                error,
                code: response.code,
                uri,
            });
        }

        Err(RequestError::from_body(response.code, &response.body).into())
    }

    fn snapshot(&self) -> DispatchState {
        let state = self.state.read();
        DispatchState {
            auth_headers: state.auth_headers.clone(),
            options: state.options,
        }
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        mut params: Params,
        auth_headers: Vec<(String, String)>,
    ) -> Result<HttpRequest, HttpError> {
        let (url, headers) = if path.starts_with("http") {
            (path.to_string(), Vec::new())
        } else {
            (format!("{}{path}", self.api_url), auth_headers)
        };

        let mut builder = HttpRequest::builder(method, url).headers(headers);

        if method.uses_query() {
            builder = builder.query(params.to_pairs());
        } else if let Some(image) = params.remove(IMAGE_PARAM) {
            let file = match image {
                ParamValue::File(file) => file,
                ParamValue::Text(path) => FilePart::from_path(&path).map_err(|e| {
                    InvalidHttpRequestError::UnreadableFile {
                        path,
                        reason: e.to_string(),
                    }
                })?,
                ParamValue::List(_) => {
                    return Err(InvalidHttpRequestError::UnreadableFile {
                        path: IMAGE_PARAM.to_string(),
                        reason: "expected a file, found a list".to_string(),
                    }
                    .into())
                }
            };
            builder = builder.body(RequestBody::Multipart {
                name: IMAGE_PARAM.to_string(),
                file,
            });
        } else {
            builder = builder.body(RequestBody::Form(params.to_pairs()));
        }

        Ok(builder.build()?)
    }
}
