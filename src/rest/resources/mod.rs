//! Typed entity views over [`Resource`].
//!
//! Each view is a newtype that derefs to [`Resource`], so every dynamic
//! accessor (`get`, `set`, `to_value`, ...) is available, and adds the
//! endpoints that belong to that entity. Endpoint methods take the
//! [`RequestDispatcher`] explicitly; no view holds a client.
//!
//! | View                    | Associations                                               |
//! |-------------------------|------------------------------------------------------------|
//! | [`Listing`]             | `Shop` → Shop, `User` → User, `Images` → ListingImage      |
//! | [`ListingInventory`]    | `products` → ListingProduct                                |
//! | [`Receipt`]             | `shipments` → Shipment                                     |
//! | [`ShippingProfile`]     | `shipping_profile_destinations` → ShippingDestination, `shipping_profile_upgrades` → ShippingUpgrade |
//!
//! Child resources fetched through a parent receive the parent's
//! identifiers (`shop_id`, `listing_id`) when the API omits them, so their
//! own endpoints can build paths.
//!
//! [`RequestDispatcher`]: crate::clients::RequestDispatcher

use crate::clients::{HttpMethod, Params, RequestDispatcher};
use crate::rest::{Collection, Entity, EntitySchema, ResourceError, ResourceFactory};

macro_rules! entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name($crate::rest::Resource);

        impl $crate::rest::Entity for $name {
            const NAME: &'static str = stringify!($name);

            fn from_resource(resource: $crate::rest::Resource) -> Self {
                Self(resource)
            }

            fn into_resource(self) -> $crate::rest::Resource {
                self.0
            }
        }

        impl $crate::rest::AsResource for $name {
            fn as_resource(&self) -> &$crate::rest::Resource {
                &self.0
            }

            fn as_resource_mut(&mut self) -> &mut $crate::rest::Resource {
                &mut self.0
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::rest::Resource;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

mod listing;
mod receipt;
mod shipping;
mod shop;
mod taxonomy;
mod user;

pub use listing::{
    Listing, ListingImage, ListingInventory, ListingProduct, ListingProperty, ListingTranslation,
};
pub use receipt::{Receipt, Shipment, Transaction};
pub use shipping::{ShippingCarrier, ShippingDestination, ShippingProfile, ShippingUpgrade};
pub use shop::{Review, Shop, ShopSection};
pub use taxonomy::{Taxonomy, TaxonomyProperty};
pub use user::{User, UserAddress};

/// Every registered entity schema.
pub(crate) static SCHEMAS: &[&EntitySchema] = &[
    &listing::LISTING_SCHEMA,
    &listing::LISTING_INVENTORY_SCHEMA,
    &receipt::RECEIPT_SCHEMA,
    &shipping::SHIPPING_PROFILE_SCHEMA,
];

/// Fetches a single resource as `T`. A soft 404 yields `None`.
pub(crate) async fn fetch_one<T: Entity>(
    client: &RequestDispatcher,
    method: HttpMethod,
    path: &str,
    params: Params,
) -> Result<Option<T>, ResourceError> {
    ResourceFactory::fetch(client, method, path, T::NAME, params)
        .await?
        .into_entity()
}

/// Fetches a list as `T`. A soft 404 yields an empty collection.
pub(crate) async fn fetch_many<T: Entity>(
    client: &RequestDispatcher,
    path: &str,
    params: Params,
) -> Result<Collection<T>, ResourceError> {
    ResourceFactory::fetch(client, HttpMethod::Get, path, T::NAME, params)
        .await?
        .into_collection()
}
