//! Token issuance: authorization-code exchange, refresh, and legacy exchange.
//!
//! All three grants POST a form to the token endpoint and share one error
//! path:
//!
//! - no response at all: the [`TransportError`] is returned unchanged
//! - non-2xx: [`OAuthError::TokenRequestFailed`] with the status and the
//!   provider's `error` / `error_description`
//! - 2xx without `access_token` / `refresh_token`: [`OAuthError::InvalidTokenResponse`]
//!
//! Nothing is retried.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::auth::credentials::TokenPair;
use crate::auth::oauth::authorization_url::{build_authorization_url, AuthorizationRequest};
use crate::auth::oauth::pkce::{random_bytes, PkceChallenge};
use crate::auth::oauth::OAuthError;
use crate::auth::PermissionScopes;
use crate::clients::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
use crate::config::{ClientId, EndpointUrl, EtsyConfig};

/// Default nonce length in bytes (24 hex characters).
pub const DEFAULT_NONCE_BYTES: usize = 12;

const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";
const REFRESH_TOKEN_GRANT: &str = "refresh_token";
const TOKEN_EXCHANGE_GRANT: &str = "token_exchange";

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Owns the client credentials and runs the OAuth 2.0 flows.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use etsy_api::auth::oauth::TokenManager;
/// use etsy_api::clients::HttpClient;
///
/// let tokens = TokenManager::new(&config, Arc::new(HttpClient::new(Some(&config))));
///
/// let request = tokens.begin_authorization(redirect_uri, &"listings_r".parse()?)?;
/// // ... user approves, Etsy redirects back with ?code=...&state=...
/// let pair = tokens
///     .exchange_authorization_code(redirect_uri, &code, &request.verifier)
///     .await?;
/// ```
pub struct TokenManager {
    client_id: ClientId,
    token_url: EndpointUrl,
    connect_url: EndpointUrl,
    transport: Arc<dyn Transport>,
}

// Verify TokenManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenManager>();
};

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url)
            .field("connect_url", &self.connect_url)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Creates a token manager from a configuration and a transport.
    #[must_use]
    pub fn new(config: &EtsyConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client_id: config.client_id().clone(),
            token_url: config.token_url().clone(),
            connect_url: config.connect_url().clone(),
            transport,
        }
    }

    /// Returns the OAuth client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Builds the authorization URL for a caller-supplied challenge and nonce.
    #[must_use]
    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        scopes: &PermissionScopes,
        code_challenge: &str,
        nonce: &str,
    ) -> String {
        build_authorization_url(
            &self.connect_url,
            &self.client_id,
            redirect_uri,
            scopes,
            code_challenge,
            nonce,
        )
    }

    /// Generates a PKCE pair and nonce and builds the authorization URL.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::EntropyUnavailable`] if the OS RNG fails.
    pub fn begin_authorization(
        &self,
        redirect_uri: &str,
        scopes: &PermissionScopes,
    ) -> Result<AuthorizationRequest, OAuthError> {
        let pkce = PkceChallenge::generate()?;
        let state = Self::create_nonce(DEFAULT_NONCE_BYTES)?;
        let url = self.authorization_url(redirect_uri, scopes, &pkce.challenge, &state);
        Ok(AuthorizationRequest {
            url,
            state,
            verifier: pkce.verifier,
        })
    }

    /// Generates a PKCE verifier/challenge pair.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::EntropyUnavailable`] if the OS RNG fails.
    pub fn generate_pkce(byte_length: usize) -> Result<PkceChallenge, OAuthError> {
        PkceChallenge::with_byte_length(byte_length)
    }

    /// Returns `bytes` random bytes as lowercase hex, for use as `state`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::EntropyUnavailable`] if the OS RNG fails.
    pub fn create_nonce(bytes: usize) -> Result<String, OAuthError> {
        let bytes = random_bytes(bytes)?;
        Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Exchanges an authorization code for a token pair.
    ///
    /// # Errors
    ///
    /// See the [module documentation](self).
    pub async fn exchange_authorization_code(
        &self,
        redirect_uri: &str,
        code: &str,
        verifier: &str,
    ) -> Result<TokenPair, OAuthError> {
        self.request_token(
            AUTHORIZATION_CODE_GRANT,
            &[
                ("redirect_uri", redirect_uri),
                ("code", code),
                ("code_verifier", verifier),
            ],
        )
        .await
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// See the [module documentation](self).
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError> {
        self.request_token(REFRESH_TOKEN_GRANT, &[("refresh_token", refresh_token)])
            .await
    }

    /// Exchanges a legacy OAuth 1.0 token for an OAuth 2.0 token pair.
    ///
    /// # Errors
    ///
    /// See the [module documentation](self).
    pub async fn exchange_legacy_token(&self, legacy_token: &str) -> Result<TokenPair, OAuthError> {
        self.request_token(TOKEN_EXCHANGE_GRANT, &[("legacy_token", legacy_token)])
            .await
    }

    async fn request_token(
        &self,
        grant_type: &str,
        fields: &[(&str, &str)],
    ) -> Result<TokenPair, OAuthError> {
        let mut form = vec![
            ("grant_type".to_string(), grant_type.to_string()),
            ("client_id".to_string(), self.client_id.as_ref().to_string()),
        ];
        form.extend(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        );

        let request = HttpRequest::builder(HttpMethod::Post, self.token_url.as_ref())
            .body(RequestBody::Form(form))
            .build()?;

        tracing::debug!(grant_type, "Requesting Etsy access token");

        let response = self.transport.send(request).await?;

        if !response.is_ok() {
            let error = Self::token_error(&response);
            tracing::warn!(grant_type, status = response.code, "Etsy token request failed");
            return Err(error);
        }

        let pair: TokenPair =
            serde_json::from_str(&response.body).map_err(|e| OAuthError::InvalidTokenResponse {
                status: response.code,
                message: e.to_string(),
            })?;

        Ok(pair.issued_at(Utc::now()))
    }

    fn token_error(response: &HttpResponse) -> OAuthError {
        let parsed: Option<TokenErrorBody> = serde_json::from_str(&response.body).ok();
        let (error, description) = match parsed {
            Some(TokenErrorBody {
                error: Some(error),
                error_description,
            }) => (error, error_description),
            _ => (response.body.clone(), None),
        };
        OAuthError::TokenRequestFailed {
            status: response.code,
            error,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_nonce_is_hex_of_requested_length() {
        let nonce = TokenManager::create_nonce(DEFAULT_NONCE_BYTES).unwrap();
        assert_eq!(nonce.len(), 24);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        assert_eq!(TokenManager::create_nonce(4).unwrap().len(), 8);
    }

    #[test]
    fn test_nonces_differ() {
        assert_ne!(
            TokenManager::create_nonce(16).unwrap(),
            TokenManager::create_nonce(16).unwrap()
        );
    }

    #[test]
    fn test_token_error_reads_error_and_description() {
        let response = HttpResponse::new(
            400,
            std::collections::HashMap::new(),
            r#"{"error":"invalid_grant","error_description":"code was already redeemed"}"#,
        );

        let OAuthError::TokenRequestFailed {
            status,
            error,
            description,
        } = TokenManager::token_error(&response)
        else {
            panic!("expected TokenRequestFailed");
        };
        assert_eq!(status, 400);
        assert_eq!(error, "invalid_grant");
        assert_eq!(description.as_deref(), Some("code was already redeemed"));
    }

    #[test]
    fn test_token_error_falls_back_to_raw_body() {
        let response = HttpResponse::new(503, std::collections::HashMap::new(), "maintenance");

        let error = TokenManager::token_error(&response);
        assert!(error.to_string().contains(r#"with error "maintenance""#));
    }
}
