//! Resource-level error types.
//!
//! [`ResourceError`] adds caller-input validation and path-building failures
//! on top of [`HttpError`]. Validation failures are raised before any
//! request is dispatched.
//!
//! # Example
//!
//! ```rust
//! use etsy_api::rest::ResourceError;
//!
//! let error = ResourceError::MissingField {
//!     entity: "Listing".to_string(),
//!     field: "shop_id",
//! };
//! assert_eq!(
//!     error.to_string(),
//!     "Listing has no 'shop_id' to build the request path"
//! );
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Caller-supplied input violated a precondition.
    #[error("{message}")]
    Validation {
        /// A human-readable message.
        message: String,
    },

    /// An identifier needed to build a request path is absent.
    #[error("{entity} has no '{field}' to build the request path")]
    MissingField {
        /// The entity the field was read from.
        entity: String,
        /// The missing field.
        field: &'static str,
    },

    /// The response materialized to a different shape than the endpoint returns.
    #[error("Expected {expected} for {entity}")]
    UnexpectedShape {
        /// The entity being materialized.
        entity: String,
        /// What the endpoint should have returned.
        expected: &'static str,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Creates a [`ResourceError::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this error was raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::MissingField { .. })
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::RequestError;

    #[test]
    fn test_validation_displays_message_verbatim() {
        let error = ResourceError::validation("Section title cannot be blank.");
        assert_eq!(error.to_string(), "Section title cannot be blank.");
        assert!(error.is_local());
    }

    #[test]
    fn test_http_error_is_transparent() {
        let http: HttpError = RequestError::from_body(500, r#"{"error":"boom"}"#).into();
        let expected = http.to_string();

        let error: ResourceError = http.into();
        assert_eq!(error.to_string(), expected);
        assert!(!error.is_local());
    }

    #[test]
    fn test_unexpected_shape_message() {
        let error = ResourceError::UnexpectedShape {
            entity: "Shop".to_string(),
            expected: "a single resource",
        };
        assert_eq!(error.to_string(), "Expected a single resource for Shop");
    }
}
