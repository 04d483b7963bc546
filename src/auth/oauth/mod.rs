//! OAuth 2.0 for the Etsy Open API.
//!
//! Etsy uses the authorization code grant with PKCE. This module covers the
//! whole exchange:
//!
//! 1. **Authorization** ([`TokenManager::begin_authorization`]): generate a
//!    PKCE pair and `state` nonce and build the connect URL.
//! 2. **Code exchange** ([`TokenManager::exchange_authorization_code`]):
//!    trade the callback's `code` and the stored verifier for a [`TokenPair`].
//! 3. **Refresh** ([`TokenManager::refresh_access_token`]): trade a refresh
//!    token for a new pair.
//! 4. **Legacy exchange** ([`TokenManager::exchange_legacy_token`]): upgrade
//!    an OAuth 1.0 token.
//!
//! Comparing the callback's `state` with the stored nonce is the
//! application's job.
//!
//! [`TokenPair`]: crate::auth::TokenPair

mod authorization_url;
mod error;
mod pkce;
mod token;

pub use authorization_url::{build_authorization_url, AuthorizationRequest};
pub use error::OAuthError;
pub use pkce::{PkceChallenge, DEFAULT_VERIFIER_BYTES};
pub use token::{TokenManager, DEFAULT_NONCE_BYTES};
