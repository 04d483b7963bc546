//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Etsy OAuth client ID (the app's "keystring").
///
/// This newtype ensures the client ID is not blank. It is sent as the
/// `x-api-key` header on every resource request and as `client_id` during
/// token exchange.
///
/// # Example
///
/// ```rust
/// use etsy_api::ClientId;
///
/// let id = ClientId::new("my-keystring").unwrap();
/// assert_eq!(id.as_ref(), "my-keystring");
/// assert!(ClientId::new(" \t").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty or only whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ClientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Etsy API key (an OAuth access token issued to a user).
///
/// Etsy access tokens embed the numeric ID of the user that granted access,
/// followed by a `.` separator: `12345678.abcDEF...`. The prefix is what
/// [`Etsy::get_user`](crate::Etsy::get_user) queries.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only the owner
/// prefix: `ApiKey(12345678.*****)`.
///
/// # Example
///
/// ```rust
/// use etsy_api::ApiKey;
///
/// let key = ApiKey::new("12345678.secret-token").unwrap();
/// assert_eq!(key.user_id(), 12_345_678);
/// assert_eq!(format!("{key:?}"), "ApiKey(12345678.*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
    user_id: u64,
}

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is blank, or
    /// [`ConfigError::InvalidApiKey`] if it lacks a numeric prefix before `.`.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        let user_id = key
            .split_once('.')
            .and_then(|(prefix, _)| prefix.parse::<u64>().ok())
            .ok_or_else(|| ConfigError::InvalidApiKey {
                key: Self::mask(&key),
            })?;

        Ok(Self { key, user_id })
    }

    /// Returns the ID of the user this key was issued to.
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }

    fn mask(key: &str) -> String {
        let prefix = key.split('.').next().unwrap_or_default();
        format!("{prefix}.*****")
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({}.*****)", self.user_id)
    }
}

/// A validated absolute URL used for one of the Etsy endpoints.
///
/// Only the scheme and host are checked; anything after the host is kept
/// verbatim. A trailing `/` is stripped so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use etsy_api::EndpointUrl;
///
/// let url = EndpointUrl::new("https://api.etsy.com/v3/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.etsy.com/v3");
/// assert_eq!(url.scheme(), "https");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no http(s) scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !matches!(scheme, "http" | "https") {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let host = url[host_start..]
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        if host.is_empty() || host.starts_with(':') {
            return Err(ConfigError::InvalidUrl { url: url.clone() });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    pub(crate) fn from_static(url: &'static str) -> Self {
        Self {
            scheme_end: url.find("://").unwrap_or_default(),
            url: url.to_string(),
        }
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_blank_strings() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
        assert!(matches!(
            ClientId::new("   \n"),
            Err(ConfigError::EmptyClientId)
        ));
        assert!(ClientId::new("abc123").is_ok());
    }

    #[test]
    fn test_client_id_deserializes_with_validation() {
        let id: ClientId = serde_json::from_str(r#""keystring""#).unwrap();
        assert_eq!(id.as_ref(), "keystring");

        let result: Result<ClientId, _> = serde_json::from_str(r#""  ""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_parses_user_id_prefix() {
        let key = ApiKey::new("98765.token-value").unwrap();
        assert_eq!(key.user_id(), 98765);
        assert_eq!(key.as_ref(), "98765.token-value");
    }

    #[test]
    fn test_api_key_rejects_missing_prefix() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(
            ApiKey::new("no-separator"),
            Err(ConfigError::InvalidApiKey { .. })
        ));
        assert!(matches!(
            ApiKey::new("abc.token"),
            Err(ConfigError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn test_api_key_masks_token_in_debug_and_errors() {
        let key = ApiKey::new("42.super-secret").unwrap();
        let debug_output = format!("{key:?}");
        assert_eq!(debug_output, "ApiKey(42.*****)");
        assert!(!debug_output.contains("super-secret"));

        let Err(ConfigError::InvalidApiKey { key }) = ApiKey::new("user.super-secret") else {
            panic!("expected InvalidApiKey");
        };
        assert!(!key.contains("super-secret"));
    }

    #[test]
    fn test_endpoint_url_validates_format() {
        let url = EndpointUrl::new("http://127.0.0.1:8080/v3").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080/v3");

        assert!(EndpointUrl::new("api.etsy.com").is_err());
        assert!(EndpointUrl::new("ftp://api.etsy.com").is_err());
        assert!(EndpointUrl::new("https://").is_err());
    }
}
