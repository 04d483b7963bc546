//! Configuration types for the Etsy API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Etsy.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EtsyConfig`]: The main configuration struct holding all SDK settings
//! - [`EtsyConfigBuilder`]: A builder for constructing [`EtsyConfig`] instances
//! - [`RequestOptions`]: Runtime options that can be changed on a live client
//! - [`ClientId`]: A validated OAuth client ID
//! - [`ApiKey`]: A validated user access token with masked debug output
//! - [`EndpointUrl`]: A validated absolute URL for one of the Etsy endpoints
//!
//! # Example
//!
//! ```rust
//! use etsy_api::{EtsyConfig, ClientId, ApiKey};
//!
//! let config = EtsyConfig::builder()
//!     .client_id(ClientId::new("my-keystring").unwrap())
//!     .api_key(ApiKey::new("12345.access-token").unwrap())
//!     .not_found_as_error(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.options().not_found_as_error);
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ClientId, EndpointUrl};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base URL for all resource requests.
pub const API_URL: &str = "https://api.etsy.com/v3";

/// OAuth 2.0 token endpoint.
pub const TOKEN_URL: &str = "https://api.etsy.com/v3/public/oauth/token";

/// OAuth 2.0 authorization (consent) endpoint.
pub const CONNECT_URL: &str = "https://www.etsy.com/oauth/connect";

/// Options that affect how responses are classified.
///
/// These can be replaced on a live [`RequestDispatcher`](crate::clients::RequestDispatcher)
/// through `set_config`. The serialized form matches the option names
/// recognised by the Etsy API clients in other languages:
///
/// ```rust
/// use etsy_api::RequestOptions;
///
/// let options: RequestOptions = serde_json::from_str(r#"{"404_error": true}"#).unwrap();
/// assert!(options.not_found_as_error);
///
/// let defaults: RequestOptions = serde_json::from_str("{}").unwrap();
/// assert!(!defaults.not_found_as_error);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// When `true`, a 404 response is raised as a [`RequestError`](crate::clients::RequestError)
    /// instead of being downgraded to a "not found" envelope.
    #[serde(rename = "404_error", default)]
    pub not_found_as_error: bool,
}

/// Configuration for the Etsy API SDK.
///
/// This struct holds everything needed to authenticate and dispatch requests:
/// the app's client ID, the user's API key, endpoint URLs, and
/// [`RequestOptions`].
///
/// # Thread Safety
///
/// `EtsyConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct EtsyConfig {
    client_id: ClientId,
    api_key: Option<ApiKey>,
    options: RequestOptions,
    api_url: EndpointUrl,
    token_url: EndpointUrl,
    connect_url: EndpointUrl,
    user_agent_prefix: Option<String>,
}

impl EtsyConfig {
    /// Creates a new builder for constructing an `EtsyConfig`.
    #[must_use]
    pub fn builder() -> EtsyConfigBuilder {
        EtsyConfigBuilder::new()
    }

    /// Returns the OAuth client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the user's API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the response classification options.
    #[must_use]
    pub const fn options(&self) -> RequestOptions {
        self.options
    }

    /// Returns the base URL for resource requests.
    #[must_use]
    pub const fn api_url(&self) -> &EndpointUrl {
        &self.api_url
    }

    /// Returns the OAuth token endpoint.
    #[must_use]
    pub const fn token_url(&self) -> &EndpointUrl {
        &self.token_url
    }

    /// Returns the OAuth authorization endpoint.
    #[must_use]
    pub const fn connect_url(&self) -> &EndpointUrl {
        &self.connect_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify EtsyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EtsyConfig>();
};

/// Builder for constructing [`EtsyConfig`] instances.
///
/// `client_id` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `api_key`: `None` (set it later with `set_api_key` once a token is issued)
/// - `not_found_as_error`: `false`
/// - `api_url`: [`API_URL`]
/// - `token_url`: [`TOKEN_URL`]
/// - `connect_url`: [`CONNECT_URL`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct EtsyConfigBuilder {
    client_id: Option<ClientId>,
    api_key: Option<ApiKey>,
    options: RequestOptions,
    api_url: Option<EndpointUrl>,
    token_url: Option<EndpointUrl>,
    connect_url: Option<EndpointUrl>,
    user_agent_prefix: Option<String>,
}

impl EtsyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client ID (required).
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the user's API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets whether a 404 is raised as an error instead of a "not found" result.
    #[must_use]
    pub const fn not_found_as_error(mut self, enabled: bool) -> Self {
        self.options.not_found_as_error = enabled;
        self
    }

    /// Replaces all request options at once.
    #[must_use]
    pub const fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides the base URL for resource requests.
    #[must_use]
    pub fn api_url(mut self, url: EndpointUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Overrides the OAuth token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: EndpointUrl) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Overrides the OAuth authorization endpoint.
    #[must_use]
    pub fn connect_url(mut self, url: EndpointUrl) -> Self {
        self.connect_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`EtsyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` is not set.
    pub fn build(self) -> Result<EtsyConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;

        Ok(EtsyConfig {
            client_id,
            api_key: self.api_key,
            options: self.options,
            api_url: self
                .api_url
                .unwrap_or_else(|| EndpointUrl::from_static(API_URL)),
            token_url: self
                .token_url
                .unwrap_or_else(|| EndpointUrl::from_static(TOKEN_URL)),
            connect_url: self
                .connect_url
                .unwrap_or_else(|| EndpointUrl::from_static(CONNECT_URL)),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_client_id() {
        let result = EtsyConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = EtsyConfig::builder()
            .client_id(ClientId::new("keystring").unwrap())
            .build()
            .unwrap();

        assert!(config.api_key().is_none());
        assert!(!config.options().not_found_as_error);
        assert_eq!(config.api_url().as_ref(), API_URL);
        assert_eq!(config.token_url().as_ref(), TOKEN_URL);
        assert_eq!(config.connect_url().as_ref(), CONNECT_URL);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = EtsyConfig::builder()
            .client_id(ClientId::new("keystring").unwrap())
            .api_key(ApiKey::new("1.token").unwrap())
            .not_found_as_error(true)
            .api_url(EndpointUrl::new("http://localhost:9000/v3").unwrap())
            .token_url(EndpointUrl::new("http://localhost:9000/token").unwrap())
            .connect_url(EndpointUrl::new("http://localhost:9000/connect").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.api_key().map(ApiKey::user_id), Some(1));
        assert!(config.options().not_found_as_error);
        assert_eq!(config.api_url().as_ref(), "http://localhost:9000/v3");
        assert_eq!(config.token_url().as_ref(), "http://localhost:9000/token");
        assert_eq!(config.connect_url().as_ref(), "http://localhost:9000/connect");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_request_options_round_trip_uses_wire_name() {
        let options = RequestOptions {
            not_found_as_error: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"404_error":true}"#);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EtsyConfig>();
    }
}
