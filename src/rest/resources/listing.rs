//! Listings and their images, inventory, properties and translations.

use serde_json::Value;

use crate::clients::{HttpMethod, Params, RequestDispatcher, IMAGE_PARAM};
use crate::rest::resources::{fetch_many, fetch_one};
use crate::rest::{build_path, build_path_with, Collection, EntitySchema, Resource, ResourceError};

entity! {
    /// An Etsy listing.
    ///
    /// `get("url")` returns the listing URL without its tracking query.
    Listing
}

entity! {
    /// An image attached to a listing.
    ListingImage
}

entity! {
    /// The inventory of a listing: its products, offerings and prices.
    ListingInventory
}

entity! {
    /// One product of a listing's inventory.
    ListingProduct
}

entity! {
    /// A taxonomy property value set on a listing.
    ListingProperty
}

entity! {
    /// A listing's title, description and tags in one language.
    ListingTranslation
}

pub(crate) static LISTING_SCHEMA: EntitySchema = EntitySchema::new("Listing")
    .with_associations(&[
        ("Shop", "Shop"),
        ("User", "User"),
        ("Images", "ListingImage"),
    ])
    .with_computed(&[("url", canonical_url)]);

pub(crate) static LISTING_INVENTORY_SCHEMA: EntitySchema =
    EntitySchema::new("ListingInventory").with_associations(&[("products", "ListingProduct")]);

fn canonical_url(listing: &Resource) -> Option<Value> {
    let url = listing.get_str("url")?;
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    Some(Value::String(url[..end].to_string()))
}

const LISTINGS: &str = "/application/shops/{shop_id}/listings";
const LISTING: &str = "/application/shops/{shop_id}/listings/{listing_id}";
const IMAGES: &str = "/application/shops/{shop_id}/listings/{listing_id}/images";
const IMAGE: &str = "/application/shops/{shop_id}/listings/{listing_id}/images/{listing_image_id}";
const PROPERTIES: &str = "/application/shops/{shop_id}/listings/{listing_id}/properties";
const TRANSLATION: &str =
    "/application/shops/{shop_id}/listings/{listing_id}/translations/{language}";
const INVENTORY: &str = "/application/listings/{listing_id}/inventory";

impl Listing {
    /// Creates the listing in the shop named by `shop_id` and refreshes
    /// the fields this value already has.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] without `shop_id`, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn create(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(LISTINGS, self)?;
        self.0.create_request(client, &path, params).await?;
        Ok(self)
    }

    /// Updates the listing and refreshes the fields this value already has.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] without `shop_id` and
    /// `listing_id`, or [`ResourceError::Http`] if the request fails.
    pub async fn update(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(LISTING, self)?;
        self.0.update_request(client, &path, params).await?;
        Ok(self)
    }

    /// Deletes the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn delete(&self, client: &RequestDispatcher) -> Result<bool, ResourceError> {
        let path = build_path(LISTING, self)?;
        self.0.delete_request(client, &path, Params::new()).await
    }

    /// Lists the listing's properties, each tagged with `shop_id` and
    /// `listing_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_properties(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Collection<ListingProperty>, ResourceError> {
        let path = build_path(PROPERTIES, self)?;
        let mut properties = fetch_many(client, &path, Params::new()).await?;
        properties.append([
            ("shop_id", self.value_of("shop_id")),
            ("listing_id", self.value_of("listing_id")),
        ]);
        Ok(properties)
    }

    /// Lists the listing's images, each tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_images(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Collection<ListingImage>, ResourceError> {
        let path = build_path(IMAGES, self)?;
        let mut images = fetch_many(client, &path, Params::new()).await?;
        images.append([("shop_id", self.value_of("shop_id"))]);
        Ok(images)
    }

    /// Fetches one image, tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_image(
        &self,
        client: &RequestDispatcher,
        listing_image_id: u64,
    ) -> Result<Option<ListingImage>, ResourceError> {
        let path = build_path_with(
            IMAGE,
            self,
            &[("listing_image_id", listing_image_id.to_string())],
        )?;
        let image = fetch_one(client, HttpMethod::Get, &path, Params::new()).await?;
        Ok(self.with_shop_id(image))
    }

    /// Uploads an image, or re-attaches a previously deleted one.
    ///
    /// `params` must carry `image` (a file, or a path to read) or
    /// `listing_image_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] when neither is given, before
    /// any request is sent.
    pub async fn upload_image(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Option<ListingImage>, ResourceError> {
        if !params.contains(IMAGE_PARAM) && !params.contains("listing_image_id") {
            return Err(ResourceError::validation(
                "Request requires either 'listing_image_id' or 'image' parameter.",
            ));
        }
        let path = build_path(IMAGES, self)?;
        let image = fetch_one(client, HttpMethod::Post, &path, params).await?;
        Ok(self.with_shop_id(image))
    }

    /// Fetches the inventory; every product is tagged with `listing_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_inventory(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Option<ListingInventory>, ResourceError> {
        self.inventory_request(client, HttpMethod::Get, Params::new())
            .await
    }

    /// Replaces the inventory; every returned product is tagged with
    /// `listing_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn update_inventory(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Option<ListingInventory>, ResourceError> {
        self.inventory_request(client, HttpMethod::Put, params).await
    }

    async fn inventory_request(
        &self,
        client: &RequestDispatcher,
        method: HttpMethod,
        params: Params,
    ) -> Result<Option<ListingInventory>, ResourceError> {
        let path = build_path(INVENTORY, self)?;
        let mut inventory: Option<ListingInventory> =
            fetch_one(client, method, &path, params).await?;
        if let Some(products) = inventory
            .as_mut()
            .and_then(|inventory| inventory.resources_mut("products"))
        {
            let listing_id = self.value_of("listing_id");
            for product in products {
                product.set("listing_id", listing_id.clone());
            }
        }
        Ok(inventory)
    }

    /// Fetches the translation for `language`, tagged with `shop_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_translation(
        &self,
        client: &RequestDispatcher,
        language: &str,
    ) -> Result<Option<ListingTranslation>, ResourceError> {
        let path = build_path_with(TRANSLATION, self, &[("language", language.to_string())])?;
        let translation = fetch_one(client, HttpMethod::Get, &path, Params::new()).await?;
        Ok(self.with_shop_id(translation))
    }

    fn value_of(&self, field: &str) -> Value {
        self.get(field).unwrap_or_default()
    }

    fn with_shop_id<T: std::ops::DerefMut<Target = Resource>>(&self, child: Option<T>) -> Option<T> {
        child.map(|mut child| {
            child.set("shop_id", self.value_of("shop_id"));
            child
        })
    }
}

impl ListingImage {
    /// Deletes the image from its listing.
    ///
    /// Needs `shop_id`, `listing_id` and `listing_image_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn delete(&self, client: &RequestDispatcher) -> Result<bool, ResourceError> {
        let path = build_path(IMAGE, self)?;
        self.0.delete_request(client, &path, Params::new()).await
    }
}

impl ListingInventory {
    /// Returns the inventory's products.
    #[must_use]
    pub fn products(&self) -> &[Resource] {
        self.resources("products").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{Entity, ResourceFactory};
    use serde_json::json;

    fn listing(record: Value) -> Listing {
        Listing::from_resource(ResourceFactory::resource(Listing::NAME, record))
    }

    #[test]
    fn test_canonical_url_strips_query_and_fragment() {
        let listing = listing(json!({
            "url": "https://www.etsy.com/listing/1/lamp?utm_source=api&utm_medium=api#reviews"
        }));
        assert_eq!(
            listing.get("url"),
            Some(json!("https://www.etsy.com/listing/1/lamp"))
        );
    }

    #[test]
    fn test_url_without_query_is_unchanged() {
        let listing = listing(json!({"url": "https://www.etsy.com/listing/1/lamp"}));
        assert_eq!(
            listing.get("url"),
            Some(json!("https://www.etsy.com/listing/1/lamp"))
        );
    }

    #[test]
    fn test_missing_url_is_none() {
        assert_eq!(listing(json!({"listing_id": 1})).get("url"), None);
    }

    #[test]
    fn test_images_association() {
        let listing = listing(json!({
            "listing_id": 1,
            "Images": [{"listing_image_id": 3}],
        }));
        let images = listing.resources("images").unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].entity(), ListingImage::NAME);
    }

    #[test]
    fn test_inventory_products() {
        let inventory = ListingInventory::from_resource(ResourceFactory::resource(
            ListingInventory::NAME,
            json!({"products": [{"product_id": 1}, {"product_id": 2}]}),
        ));
        assert_eq!(inventory.products().len(), 2);

        let empty = ListingInventory::from_resource(Resource::new(ListingInventory::NAME));
        assert!(empty.products().is_empty());
    }

    #[test]
    fn test_with_shop_id_tags_child() {
        let parent = listing(json!({"shop_id": 9, "listing_id": 1}));
        let child = parent
            .with_shop_id(Some(ListingImage::from_resource(Resource::new("ListingImage"))))
            .unwrap();
        assert_eq!(child.get("shop_id"), Some(json!(9)));
        assert!(parent.with_shop_id::<ListingImage>(None).is_none());
    }
}
