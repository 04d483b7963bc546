//! OAuth-specific error types for the Etsy API SDK.
//!
//! # Error Types
//!
//! - [`OAuthError::TokenRequestFailed`]: The token endpoint answered with a non-2xx status
//! - [`OAuthError::InvalidTokenResponse`]: A 2xx token response could not be decoded
//! - [`OAuthError::EntropyUnavailable`]: The operating system RNG failed
//! - [`OAuthError::Transport`]: No response was obtained (propagated unchanged)
//!
//! # Example
//!
//! ```rust
//! use etsy_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::TokenRequestFailed {
//!     status: 400,
//!     error: "invalid_grant".to_string(),
//!     description: Some("code has expired".to_string()),
//! };
//! assert_eq!(
//!     error.to_string(),
//!     r#"Received HTTP status code [400] with error "invalid_grant" and message "code has expired" when requesting access token."#
//! );
//! ```

use crate::clients::{InvalidHttpRequestError, TransportError};
use thiserror::Error;

/// Errors that can occur during OAuth operations.
///
/// None of these are retried by the SDK.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token endpoint returned a non-success HTTP status.
    ///
    /// `error` is the provider's `error` code, or the raw body when the body
    /// carried none.
    #[error(
        "Received HTTP status code [{status}] with error \"{error}\"{} when requesting access token.",
        describe(.description.as_deref())
    )]
    TokenRequestFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The provider's error code.
        error: String,
        /// The provider's `error_description`, if any.
        description: Option<String>,
    },

    /// A successful token response did not carry the expected fields.
    #[error("Invalid token response (status {status}): {message}")]
    InvalidTokenResponse {
        /// The HTTP status code returned.
        status: u16,
        /// What was wrong with the body.
        message: String,
    },

    /// The secure random number generator could not supply bytes.
    #[error("Secure randomness unavailable: {reason}")]
    EntropyUnavailable {
        /// The underlying RNG error.
        reason: String,
    },

    /// The token request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// No HTTP response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

fn describe(description: Option<&str>) -> String {
    description
        .filter(|d| !d.is_empty())
        .map(|d| format!(" and message \"{d}\""))
        .unwrap_or_default()
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
