//! PKCE (Proof Key for Code Exchange, RFC 7636) helpers.
//!
//! The verifier is random bytes encoded as URL-safe base64 without padding;
//! the challenge is the same encoding of the verifier's SHA-256 digest.
//! The SDK never stores the verifier: keep it across the redirect and hand
//! it back to [`TokenManager::exchange_authorization_code`](super::TokenManager::exchange_authorization_code).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::auth::oauth::OAuthError;

/// Default number of random bytes behind a verifier (43 encoded characters).
pub const DEFAULT_VERIFIER_BYTES: usize = 32;

/// A PKCE verifier and its S256 challenge.
///
/// # Example
///
/// ```rust
/// use etsy_api::auth::oauth::PkceChallenge;
///
/// let pkce = PkceChallenge::generate().unwrap();
/// assert_eq!(pkce.verifier.len(), 43);
/// assert_eq!(pkce.challenge, PkceChallenge::challenge_for(&pkce.verifier));
/// assert_eq!(PkceChallenge::METHOD, "S256");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PkceChallenge {
    /// Sent at token exchange. Keep it secret until then.
    pub verifier: String,
    /// Sent in the authorization URL.
    pub challenge: String,
}

impl PkceChallenge {
    /// The only challenge method Etsy supports.
    pub const METHOD: &'static str = "S256";

    /// Generates a pair from [`DEFAULT_VERIFIER_BYTES`] random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::EntropyUnavailable`] if the OS RNG fails.
    pub fn generate() -> Result<Self, OAuthError> {
        Self::with_byte_length(DEFAULT_VERIFIER_BYTES)
    }

    /// Generates a pair from `byte_length` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::EntropyUnavailable`] if the OS RNG fails.
    pub fn with_byte_length(byte_length: usize) -> Result<Self, OAuthError> {
        let bytes = random_bytes(byte_length)?;
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = Self::challenge_for(&verifier);
        Ok(Self {
            verifier,
            challenge,
        })
    }

    /// Computes the S256 challenge for a verifier.
    #[must_use]
    pub fn challenge_for(verifier: &str) -> String {
        let digest = Sha256::digest(verifier.as_bytes());
        URL_SAFE_NO_PAD.encode(digest)
    }
}

impl std::fmt::Debug for PkceChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkceChallenge")
            .field("verifier", &"*****")
            .field("challenge", &self.challenge)
            .finish()
    }
}

/// Fills a buffer from the operating system RNG.
pub(crate) fn random_bytes(len: usize) -> Result<Vec<u8>, OAuthError> {
    let mut bytes = vec![0_u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| OAuthError::EntropyUnavailable {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}
