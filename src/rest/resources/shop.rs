//! Shops, their sections and reviews.

use serde_json::Value;

use crate::clients::{HttpMethod, Params, RequestDispatcher};
use crate::rest::resources::{
    fetch_many, fetch_one, Listing, Receipt, ShippingProfile, Transaction,
};
use crate::rest::{build_path, build_path_with, Collection, ResourceError};

entity! {
    /// An Etsy shop.
    ///
    /// Every endpoint reads `shop_id` from the shop itself.
    Shop
}

entity! {
    /// A section of a shop.
    ShopSection
}

entity! {
    /// A buyer review.
    Review
}

const SHOP: &str = "/application/shops/{shop_id}";
const SECTIONS: &str = "/application/shops/{shop_id}/sections";
const SECTION: &str = "/application/shops/{shop_id}/sections/{shop_section_id}";
const REVIEWS: &str = "/application/shops/{shop_id}/reviews";
const PROFILES: &str = "/application/shops/{shop_id}/shipping-profiles";
const PROFILE: &str = "/application/shops/{shop_id}/shipping-profiles/{shipping_profile_id}";
const RECEIPTS: &str = "/application/shops/{shop_id}/receipts";
const RECEIPT: &str = "/application/shops/{shop_id}/receipts/{receipt_id}";
const TRANSACTIONS: &str = "/application/shops/{shop_id}/transactions";
const LISTINGS: &str = "/application/shops/{shop_id}/listings";
const ACTIVE_LISTINGS: &str = "/application/shops/{shop_id}/listings/active";
const FEATURED_LISTINGS: &str = "/application/shops/{shop_id}/listings/featured";

impl Shop {
    /// Updates the shop and refreshes the fields this value already has.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn update(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(SHOP, self)?;
        self.0.update_request(client, &path, params).await?;
        Ok(self)
    }

    /// Lists the shop's sections, each tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_sections(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<ShopSection>, ResourceError> {
        let path = build_path(SECTIONS, self)?;
        let mut sections = fetch_many(client, &path, params).await?;
        sections.append([("shop_id", self.shop_id())]);
        Ok(sections)
    }

    /// Fetches one section, tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_section(
        &self,
        client: &RequestDispatcher,
        shop_section_id: u64,
    ) -> Result<Option<ShopSection>, ResourceError> {
        let path = build_path_with(
            SECTION,
            self,
            &[("shop_section_id", shop_section_id.to_string())],
        )?;
        let mut section: Option<ShopSection> =
            fetch_one(client, HttpMethod::Get, &path, Params::new()).await?;
        if let Some(section) = section.as_mut() {
            section.set("shop_id", self.shop_id());
        }
        Ok(section)
    }

    /// Creates a section with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for a blank title, before any
    /// request is sent.
    pub async fn create_section(
        &self,
        client: &RequestDispatcher,
        title: &str,
    ) -> Result<Option<ShopSection>, ResourceError> {
        if title.trim().is_empty() {
            return Err(ResourceError::validation("Section title cannot be blank."));
        }
        let path = build_path(SECTIONS, self)?;
        fetch_one(
            client,
            HttpMethod::Post,
            &path,
            Params::new().with("title", title),
        )
        .await
    }

    /// Lists the shop's reviews.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_reviews(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Review>, ResourceError> {
        let path = build_path(REVIEWS, self)?;
        fetch_many(client, &path, params).await
    }

    /// Lists the shop's shipping profiles.
    ///
    /// Each profile, and each of its destinations and upgrades, is tagged
    /// with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_shipping_profiles(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Collection<ShippingProfile>, ResourceError> {
        let path = build_path(PROFILES, self)?;
        let mut profiles: Collection<ShippingProfile> =
            fetch_many(client, &path, Params::new()).await?;
        let shop_id = self.shop_id();
        for profile in &mut profiles {
            profile.assign_shop_id(&shop_id);
        }
        Ok(profiles)
    }

    /// Fetches one shipping profile, tagged like
    /// [`Shop::get_shipping_profiles`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_shipping_profile(
        &self,
        client: &RequestDispatcher,
        shipping_profile_id: u64,
    ) -> Result<Option<ShippingProfile>, ResourceError> {
        let path = build_path_with(
            PROFILE,
            self,
            &[("shipping_profile_id", shipping_profile_id.to_string())],
        )?;
        self.profile_request(client, HttpMethod::Get, &path, Params::new())
            .await
    }

    /// Creates a shipping profile, tagged like
    /// [`Shop::get_shipping_profiles`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn create_shipping_profile(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Option<ShippingProfile>, ResourceError> {
        let path = build_path(PROFILES, self)?;
        self.profile_request(client, HttpMethod::Post, &path, params)
            .await
    }

    async fn profile_request(
        &self,
        client: &RequestDispatcher,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<Option<ShippingProfile>, ResourceError> {
        let mut profile: Option<ShippingProfile> = fetch_one(client, method, path, params).await?;
        if let Some(profile) = profile.as_mut() {
            profile.assign_shop_id(&self.shop_id());
        }
        Ok(profile)
    }

    /// Lists the shop's receipts, each tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_receipts(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Receipt>, ResourceError> {
        let path = build_path(RECEIPTS, self)?;
        let mut receipts = fetch_many(client, &path, params).await?;
        receipts.append([("shop_id", self.shop_id())]);
        Ok(receipts)
    }

    /// Fetches one receipt, tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_receipt(
        &self,
        client: &RequestDispatcher,
        receipt_id: u64,
    ) -> Result<Option<Receipt>, ResourceError> {
        let path = build_path_with(RECEIPT, self, &[("receipt_id", receipt_id.to_string())])?;
        let mut receipt: Option<Receipt> =
            fetch_one(client, HttpMethod::Get, &path, Params::new()).await?;
        if let Some(receipt) = receipt.as_mut() {
            receipt.set("shop_id", self.shop_id());
        }
        Ok(receipt)
    }

    /// Lists the shop's transactions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_transactions(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Transaction>, ResourceError> {
        let path = build_path(TRANSACTIONS, self)?;
        fetch_many(client, &path, params).await
    }

    /// Creates a draft listing in this shop.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn create_listing(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Option<Listing>, ResourceError> {
        let path = build_path(LISTINGS, self)?;
        fetch_one(client, HttpMethod::Post, &path, params).await
    }

    /// Lists the shop's listings in any state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_listings(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Listing>, ResourceError> {
        let path = build_path(LISTINGS, self)?;
        fetch_many(client, &path, params).await
    }

    /// Lists the shop's active listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_public_listings(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Listing>, ResourceError> {
        let path = build_path(ACTIVE_LISTINGS, self)?;
        fetch_many(client, &path, params).await
    }

    /// Lists the shop's featured listings.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_featured_listings(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Listing>, ResourceError> {
        let path = build_path(FEATURED_LISTINGS, self)?;
        fetch_many(client, &path, params).await
    }

    fn shop_id(&self) -> Value {
        self.get("shop_id").unwrap_or_default()
    }
}
