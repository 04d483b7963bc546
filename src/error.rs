//! Error types for the Etsy API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use etsy_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("   ");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("No client ID found. A valid client ID is required.")]
    EmptyClientId,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Etsy API key.")]
    EmptyApiKey,

    /// API key does not carry a numeric owner prefix.
    #[error("Invalid API key '{key}'. Expected format: '<user_id>.<token>'.")]
    InvalidApiKey {
        /// The key that was provided, with the token part masked.
        key: String,
    },

    /// A permission scope is not recognised.
    #[error("Invalid permission scope '{scope}'.")]
    InvalidScope {
        /// The scope that was provided.
        scope: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A configured URL is invalid.
    #[error("Invalid URL '{url}'. Please provide an absolute http(s) URL.")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
