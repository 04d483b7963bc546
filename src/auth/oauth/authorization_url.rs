//! Authorization URL generation.
//!
//! The first step of the Etsy OAuth flow is sending the user to the connect
//! endpoint with a PKCE challenge and an anti-CSRF `state` nonce. This module
//! builds that URL and, through [`AuthorizationRequest`], bundles it with the
//! values the application must keep until the callback arrives.
//!
//! # Example
//!
//! ```rust,ignore
//! let request = tokens.begin_authorization("https://myapp.example.com/callback", &scopes)?;
//!
//! // Persist request.state and request.verifier in the user's session,
//! // then redirect the user to request.url.
//! ```

use crate::auth::oauth::pkce::PkceChallenge;
use crate::auth::PermissionScopes;
use crate::clients::encode_pairs;
use crate::config::{ClientId, EndpointUrl};

/// Everything produced when starting an authorization.
///
/// # Important
///
/// `state` and `verifier` **must** be stored by the application. Compare
/// `state` with the callback's `state` parameter, then pass `verifier` to
/// [`TokenManager::exchange_authorization_code`](super::TokenManager::exchange_authorization_code).
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// The URL to redirect the user to.
    pub url: String,
    /// The anti-CSRF nonce sent as `state`.
    pub state: String,
    /// The PKCE verifier matching the challenge in `url`.
    pub verifier: String,
}

/// Builds the connect URL.
///
/// The query carries, in order: `response_type=code`, `redirect_uri`,
/// `scope` (space-joined), `client_id`, `state`, `code_challenge`, and
/// `code_challenge_method=S256`. The result is a pure function of its inputs.
#[must_use]
pub fn build_authorization_url(
    connect_url: &EndpointUrl,
    client_id: &ClientId,
    redirect_uri: &str,
    scopes: &PermissionScopes,
    code_challenge: &str,
    nonce: &str,
) -> String {
    let params = [
        ("response_type", "code".to_string()),
        ("redirect_uri", redirect_uri.to_string()),
        ("scope", scopes.to_string()),
        ("client_id", client_id.as_ref().to_string()),
        ("state", nonce.to_string()),
        ("code_challenge", code_challenge.to_string()),
        ("code_challenge_method", PkceChallenge::METHOD.to_string()),
    ]
    .map(|(k, v)| (k.to_string(), v));

    format!("{connect_url}/?{}", encode_pairs(&params))
}

// Verify AuthorizationRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationRequest>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn build(nonce: &str) -> String {
        build_authorization_url(
            &EndpointUrl::new("https://www.etsy.com/oauth/connect").unwrap(),
            &ClientId::new("keystring").unwrap(),
            "https://myapp.example.com/callback",
            &"listings_r shops_w".parse().unwrap(),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
            nonce,
        )
    }

    #[test]
    fn test_url_has_every_parameter_in_order() {
        assert_eq!(
            build("abc123"),
            "https://www.etsy.com/oauth/connect/?response_type=code\
             &redirect_uri=https%3A%2F%2Fmyapp.example.com%2Fcallback\
             &scope=listings_r%20shops_w\
             &client_id=keystring\
             &state=abc123\
             &code_challenge=E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM\
             &code_challenge_method=S256"
        );
    }

    #[test]
    fn test_url_is_deterministic() {
        assert_eq!(build("n"), build("n"));
        assert_ne!(build("n"), build("m"));
    }
}
