//! Issued OAuth credentials.
//!
//! This module provides the [`TokenPair`] type returned by every token
//! exchange. A pair is immutable: refreshing yields a new pair.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ApiKey;
use crate::error::ConfigError;

/// An access/refresh token pair issued by the Etsy token endpoint.
///
/// # Security
///
/// The `Debug` implementation masks both tokens.
///
/// # Example
///
/// ```rust
/// use etsy_api::TokenPair;
///
/// let pair: TokenPair = serde_json::from_str(
///     r#"{"access_token":"12345.abc","refresh_token":"12345.def","token_type":"Bearer","expires_in":3600}"#,
/// ).unwrap();
///
/// assert_eq!(pair.api_key().unwrap().user_id(), 12345);
/// assert!(!format!("{pair:?}").contains("abc"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The bearer token used for API calls.
    pub access_token: String,

    /// The token used to obtain a new pair.
    pub refresh_token: String,

    /// The token type, normally `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Lifetime of the access token in seconds, as reported at issue time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// When the access token expires, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    /// Creates a pair with no expiry information.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: None,
            expires_in: None,
            expires_at: None,
        }
    }

    /// Stamps `expires_at` from `expires_in`, counting from `issued_at`.
    #[must_use]
    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self
                .expires_in
                .map(|secs| issued_at + Duration::seconds(secs));
        }
        self
    }

    /// Returns `true` if the access token has expired.
    ///
    /// Pairs without expiry information are never considered expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns the access token as a validated [`ApiKey`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token lacks the numeric user prefix.
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        ApiKey::new(self.access_token.clone())
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"*****")
            .field("refresh_token", &"*****")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// Verify TokenPair is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenPair>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_at_computes_expiry() {
        let issued = Utc::now();
        let pair: TokenPair =
            serde_json::from_str(r#"{"access_token":"1.a","refresh_token":"1.r","expires_in":3600}"#)
                .unwrap();

        let pair = pair.issued_at(issued);

        assert_eq!(pair.expires_at, Some(issued + Duration::seconds(3600)));
        assert!(!pair.expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let pair = TokenPair {
            expires_in: Some(60),
            ..TokenPair::new("1.a", "1.r")
        }
        .issued_at(Utc::now() - Duration::hours(2));

        assert!(pair.expired());
    }

    #[test]
    fn test_without_expiry_never_expires() {
        let pair = TokenPair::new("1.a", "1.r").issued_at(Utc::now());
        assert!(pair.expires_at.is_none());
        assert!(!pair.expired());
    }

    #[test]
    fn test_debug_masks_tokens() {
        let pair = TokenPair::new("1.secret-access", "1.secret-refresh");
        let debug = format!("{pair:?}");
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_api_key_parses_user_prefix() {
        let pair = TokenPair::new("4242.token", "4242.refresh");
        assert_eq!(pair.api_key().unwrap().user_id(), 4242);

        let pair = TokenPair::new("opaque", "refresh");
        assert!(pair.api_key().is_err());
    }
}
