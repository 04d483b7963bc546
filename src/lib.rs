//! # Etsy API Rust SDK
//!
//! A Rust SDK for the Etsy Open API v3: OAuth 2.0 with PKCE, a
//! rate-limited request dispatcher, and dynamic resource materialization.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`EtsyConfig`] and [`EtsyConfigBuilder`]
//! - Validated newtypes for credentials and endpoint URLs
//! - OAuth 2.0 authorization with PKCE, token refresh and legacy token
//!   exchange via [`auth::oauth`]
//! - A [`RequestDispatcher`](clients::RequestDispatcher) that attaches
//!   credentials, throttles against Etsy's per-second quota and classifies
//!   failures
//! - Case-insensitive [`Resource`](rest::Resource) property bags with typed
//!   entity views in [`rest::resources`]
//! - The [`Etsy`] client with the entry-point endpoints
//!
//! ## Quick Start
//!
//! ```rust
//! use etsy_api::{ApiKey, ClientId, EtsyConfig};
//!
//! let config = EtsyConfig::builder()
//!     .client_id(ClientId::new("your-keystring").unwrap())
//!     .api_key(ApiKey::new("12345.access-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_key().unwrap().user_id(), 12345);
//! ```
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use etsy_api::auth::oauth::TokenManager;
//! use etsy_api::clients::HttpClient;
//!
//! let tokens = TokenManager::new(&config, Arc::new(HttpClient::new(Some(&config))));
//!
//! // Step 1: send the user to Etsy; keep state and verifier in the session
//! let request = tokens.begin_authorization("https://your-app.com/callback", &"listings_r".parse()?)?;
//!
//! // Step 2: after the callback, check `state` and exchange the code
//! let pair = tokens
//!     .exchange_authorization_code("https://your-app.com/callback", &code, &request.verifier)
//!     .await?;
//!
//! // Later: refresh
//! let pair = tokens.refresh_access_token(&pair.refresh_token).await?;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use etsy_api::Etsy;
//! use etsy_api::clients::Params;
//!
//! let etsy = Etsy::new(config)?;
//!
//! let listings = etsy.get_listings(&[1, 2, 3], &["Images"]).await?;
//! for listing in &listings {
//!     println!("{:?}", listing.get("title"));
//! }
//!
//! if let Some(shop) = etsy.get_shop(None).await? {
//!     let receipts = shop.get_receipts(etsy.dispatcher(), Params::new().with("limit", 25)).await?;
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: every call receives its client explicitly
//! - **Fail-fast validation**: newtypes and caller input are checked before
//!   any request is sent
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **No automatic retries**: every failure surfaces once to the caller
//! - **Pluggable transport**: supply any [`clients::Transport`] for proxying
//!   or testing

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::{Etsy, MAX_BATCH_LISTINGS};

// Re-export public types at crate root for convenience
pub use auth::{PermissionScopes, TokenPair};
pub use config::{ApiKey, ClientId, EndpointUrl, EtsyConfig, EtsyConfigBuilder, RequestOptions};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Envelope, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Params,
    RequestDispatcher, RequestError, Transport, TransportError,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{AuthorizationRequest, OAuthError, PkceChallenge, TokenManager};

// Re-export resource types
pub use rest::{Collection, Materialized, Resource, ResourceError, ResourceFactory};
