//! Authentication types for the Etsy API SDK.
//!
//! - [`PermissionScopes`]: the OAuth scopes requested at authorization
//! - [`TokenPair`]: an issued access/refresh token pair
//! - [`oauth`]: PKCE authorization, code exchange, refresh and legacy exchange
//!
//! # Example
//!
//! ```rust
//! use etsy_api::auth::PermissionScopes;
//!
//! let scopes: PermissionScopes = "listings_r shops_w".parse().unwrap();
//! assert!(scopes.contains("shops_w"));
//! assert_eq!(scopes.to_string(), "listings_r shops_w");
//! ```

mod credentials;
pub mod oauth;
mod scopes;

pub use credentials::TokenPair;
pub use scopes::{PermissionScopes, ALL_SCOPES};
