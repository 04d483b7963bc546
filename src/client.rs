//! The top-level [`Etsy`] client.
//!
//! `Etsy` owns one [`RequestDispatcher`] and one [`TokenManager`] sharing a
//! transport. It exposes the entry-point endpoints; everything reachable
//! from a returned entity is called on that entity, passing
//! [`Etsy::dispatcher`] explicitly.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::auth::oauth::TokenManager;
use crate::clients::{HttpClient, HttpMethod, Params, RequestDispatcher, Transport};
use crate::config::{ApiKey, EtsyConfig, RequestOptions};
use crate::error::ConfigError;
use crate::rest::resources::{
    fetch_many, fetch_one, Listing, ShippingCarrier, ShippingProfile, Shop, Taxonomy,
    TaxonomyProperty, User,
};
use crate::rest::{Collection, ResourceError};

/// Maximum number of ids accepted by [`Etsy::get_listings`].
pub const MAX_BATCH_LISTINGS: usize = 100;

/// A client for one Etsy app acting on behalf of one user.
///
/// # Example
///
/// ```rust,ignore
/// use etsy_api::{ApiKey, ClientId, Etsy, EtsyConfig};
///
/// let config = EtsyConfig::builder()
///     .client_id(ClientId::new("keystring")?)
///     .api_key(ApiKey::new("12345.access-token")?)
///     .build()?;
/// let etsy = Etsy::new(config)?;
///
/// if let Some(shop) = etsy.get_shop(None).await? {
///     let listings = shop.get_listings(etsy.dispatcher(), Default::default()).await?;
///     println!("{} listings", listings.len());
/// }
/// ```
pub struct Etsy {
    dispatcher: RequestDispatcher,
    tokens: TokenManager,
    api_key: RwLock<ApiKey>,
}

// Verify Etsy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Etsy>();
};

impl std::fmt::Debug for Etsy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Etsy")
            .field("dispatcher", &self.dispatcher)
            .field("api_key", &*self.api_key.read())
            .finish_non_exhaustive()
    }
}

impl Etsy {
    /// Creates a client using the default [`HttpClient`] transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the configuration
    /// has no API key.
    pub fn new(config: EtsyConfig) -> Result<Self, ConfigError> {
        let transport = Arc::new(HttpClient::new(Some(&config)));
        Self::with_transport(config, transport)
    }

    /// Creates a client with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the configuration
    /// has no API key.
    pub fn with_transport(
        config: EtsyConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key()
            .cloned()
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        Ok(Self {
            dispatcher: RequestDispatcher::new(&config, Arc::clone(&transport)),
            tokens: TokenManager::new(&config, transport),
            api_key: RwLock::new(api_key),
        })
    }

    /// Returns the dispatcher, for calling endpoints on returned entities.
    #[must_use]
    pub const fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Returns the token manager for refreshing this client's credentials.
    #[must_use]
    pub const fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Replaces the API key, for example after a token refresh.
    pub fn set_api_key(&self, api_key: ApiKey) {
        self.dispatcher.set_api_key(&api_key);
        *self.api_key.write() = api_key;
    }

    /// Replaces the response classification options.
    pub fn set_config(&self, options: RequestOptions) {
        self.dispatcher.set_config(options);
    }

    /// Checks connectivity and credentials. Returns the application id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn ping(&self) -> Result<Option<u64>, ResourceError> {
        let envelope = self
            .dispatcher
            .get("/application/openapi-ping", Params::new())
            .await?;
        Ok(envelope
            .data()
            .and_then(|data| data.get("application_id"))
            .and_then(serde_json::Value::as_u64))
    }

    /// Fetches the user who owns the API key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_user(&self) -> Result<Option<User>, ResourceError> {
        let user_id = self.api_key.read().user_id();
        let path = format!("/application/users/{user_id}");
        fetch_one(&self.dispatcher, HttpMethod::Get, &path, Params::new()).await
    }

    /// Fetches a shop by id, or the API key owner's shop when `shop_id` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if a request fails.
    pub async fn get_shop(&self, shop_id: Option<u64>) -> Result<Option<Shop>, ResourceError> {
        match shop_id {
            Some(shop_id) => {
                let path = format!("/application/shops/{shop_id}");
                fetch_one(&self.dispatcher, HttpMethod::Get, &path, Params::new()).await
            }
            None => match self.get_user().await? {
                Some(user) => user.get_shops(&self.dispatcher).await,
                None => Ok(None),
            },
        }
    }

    /// Searches shops by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for a blank keyword, before any
    /// request is sent.
    pub async fn get_shops(
        &self,
        keyword: &str,
        params: Params,
    ) -> Result<Collection<Shop>, ResourceError> {
        if keyword.trim().is_empty() {
            return Err(ResourceError::validation(
                "You must specify a keyword when searching for Etsy shops.",
            ));
        }
        fetch_many(
            &self.dispatcher,
            "/application/shops",
            params.with("shop_name", keyword),
        )
        .await
    }

    /// Lists the full seller taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_seller_taxonomy(&self) -> Result<Collection<Taxonomy>, ResourceError> {
        fetch_many(
            &self.dispatcher,
            "/application/seller-taxonomy/nodes",
            Params::new(),
        )
        .await
    }

    /// Lists the properties of one taxonomy node.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_seller_taxonomy_properties(
        &self,
        taxonomy_id: u64,
    ) -> Result<Collection<TaxonomyProperty>, ResourceError> {
        let path = format!("/application/seller-taxonomy/nodes/{taxonomy_id}/properties");
        fetch_many(&self.dispatcher, &path, Params::new()).await
    }

    /// Lists a shop's shipping profiles.
    ///
    /// Profiles fetched this way are not tagged with `shop_id`; use
    /// [`Shop::get_shipping_profiles`] for profiles whose endpoints will be
    /// called.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_shipping_profiles(
        &self,
        shop_id: u64,
    ) -> Result<Collection<ShippingProfile>, ResourceError> {
        let path = format!("/application/shops/{shop_id}/shipping-profiles");
        fetch_many(&self.dispatcher, &path, Params::new()).await
    }

    /// Lists shipping carriers available from a country.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_shipping_carriers(
        &self,
        origin_country_iso: &str,
    ) -> Result<Collection<ShippingCarrier>, ResourceError> {
        fetch_many(
            &self.dispatcher,
            "/application/shipping-carriers",
            Params::new().with("origin_country_iso", origin_country_iso),
        )
        .await
    }

    /// Fetches a listing. `includes` names associations to embed, such as
    /// `Images` or `Shop`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_listing(
        &self,
        listing_id: u64,
        includes: &[&str],
    ) -> Result<Option<Listing>, ResourceError> {
        let path = format!("/application/listings/{listing_id}");
        fetch_one(
            &self.dispatcher,
            HttpMethod::Get,
            &path,
            Params::new().with("includes", includes),
        )
        .await
    }

    /// Searches all active listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_public_listings(
        &self,
        params: Params,
    ) -> Result<Collection<Listing>, ResourceError> {
        fetch_many(&self.dispatcher, "/application/listings/active", params).await
    }

    /// Fetches up to [`MAX_BATCH_LISTINGS`] listings in one request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for an empty id list or more
    /// than [`MAX_BATCH_LISTINGS`] ids, before any request is sent.
    pub async fn get_listings(
        &self,
        listing_ids: &[u64],
        includes: &[&str],
    ) -> Result<Collection<Listing>, ResourceError> {
        if listing_ids.is_empty() || listing_ids.len() > MAX_BATCH_LISTINGS {
            return Err(ResourceError::validation(
                "Query requires at least one listing ID and cannot exceed a maximum of 100 listing IDs.",
            ));
        }
        fetch_many(
            &self.dispatcher,
            "/application/listings/batch",
            Params::new()
                .with("listing_ids", listing_ids)
                .with("includes", includes),
        )
        .await
    }
}
