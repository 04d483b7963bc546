//! Shipping profiles, destinations, upgrades and carriers.

use serde_json::Value;

use crate::clients::{HttpMethod, Params, RequestDispatcher};
use crate::rest::resources::fetch_one;
use crate::rest::{build_path, EntitySchema, Property, Resource, ResourceError};

entity! {
    /// A shop's shipping profile.
    ShippingProfile
}

entity! {
    /// A destination of a shipping profile.
    ShippingDestination
}

entity! {
    /// A paid shipping upgrade of a shipping profile.
    ShippingUpgrade
}

entity! {
    /// A shipping carrier and its mail classes.
    ShippingCarrier
}

pub(crate) static SHIPPING_PROFILE_SCHEMA: EntitySchema = EntitySchema::new("ShippingProfile")
    .with_associations(&[
        ("shipping_profile_destinations", "ShippingDestination"),
        ("shipping_profile_upgrades", "ShippingUpgrade"),
    ]);

const DESTINATIONS_FIELD: &str = "shipping_profile_destinations";
const UPGRADES_FIELD: &str = "shipping_profile_upgrades";

const PROFILE: &str = "/application/shops/{shop_id}/shipping-profiles/{shipping_profile_id}";
const DESTINATIONS: &str =
    "/application/shops/{shop_id}/shipping-profiles/{shipping_profile_id}/destinations";
const DESTINATION: &str = "/application/shops/{shop_id}/shipping-profiles/{shipping_profile_id}/destinations/{shipping_profile_destination_id}";

impl ShippingProfile {
    /// Updates the profile and refreshes the fields this value already has.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn update(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(PROFILE, self)?;
        self.0.update_request(client, &path, params).await?;
        Ok(self)
    }

    /// Deletes the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn delete(&self, client: &RequestDispatcher) -> Result<bool, ResourceError> {
        let path = build_path(PROFILE, self)?;
        self.0.delete_request(client, &path, Params::new()).await
    }

    /// Creates a destination on this profile.
    ///
    /// The new destination is tagged with `shop_id` and appended to this
    /// profile's `shipping_profile_destinations`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn create_shipping_destination(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Option<ShippingDestination>, ResourceError> {
        let path = build_path(DESTINATIONS, self)?;
        let mut destination: Option<ShippingDestination> =
            fetch_one(client, HttpMethod::Post, &path, params).await?;

        if let Some(destination) = destination.as_mut() {
            destination.set("shop_id", self.get("shop_id").unwrap_or_default());
            let copy = destination.0.clone();
            match self.resources_mut(DESTINATIONS_FIELD) {
                Some(destinations) => destinations.push(copy),
                None => self.set(DESTINATIONS_FIELD, Property::Resources(vec![copy])),
            }
        }
        Ok(destination)
    }

    /// Returns the profile's destinations.
    #[must_use]
    pub fn destinations(&self) -> &[Resource] {
        self.resources(DESTINATIONS_FIELD).unwrap_or_default()
    }

    /// Returns the profile's upgrades.
    #[must_use]
    pub fn upgrades(&self) -> &[Resource] {
        self.resources(UPGRADES_FIELD).unwrap_or_default()
    }

    /// Tags the profile, its destinations and its upgrades with `shop_id`.
    pub(crate) fn assign_shop_id(&mut self, shop_id: &Value) {
        self.set("shop_id", shop_id.clone());
        for field in [DESTINATIONS_FIELD, UPGRADES_FIELD] {
            if let Some(children) = self.resources_mut(field) {
                for child in children {
                    child.set("shop_id", shop_id.clone());
                }
            }
        }
    }
}

impl ShippingDestination {
    /// Updates the destination and refreshes the fields this value already
    /// has.
    ///
    /// Needs `shop_id`, `shipping_profile_id` and
    /// `shipping_profile_destination_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn update(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(DESTINATION, self)?;
        self.0.update_request(client, &path, params).await?;
        Ok(self)
    }

    /// Deletes the destination.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn delete(&self, client: &RequestDispatcher) -> Result<bool, ResourceError> {
        let path = build_path(DESTINATION, self)?;
        self.0.delete_request(client, &path, Params::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{Entity, ResourceFactory};
    use serde_json::json;

    #[test]
    fn test_assign_shop_id_reaches_children() {
        let mut profile = ShippingProfile::from_resource(ResourceFactory::resource(
            ShippingProfile::NAME,
            json!({
                "shipping_profile_id": 5,
                "shipping_profile_destinations": [{"shipping_profile_destination_id": 1}, {"shipping_profile_destination_id": 2}],
                "shipping_profile_upgrades": [{"upgrade_id": 3}],
            }),
        ));

        profile.assign_shop_id(&json!(9));

        assert_eq!(profile.get("shop_id"), Some(json!(9)));
        assert_eq!(profile.destinations().len(), 2);
        assert!(profile
            .destinations()
            .iter()
            .all(|d| d.entity() == "ShippingDestination" && d.get("shop_id") == Some(json!(9))));
        assert_eq!(profile.upgrades()[0].entity(), "ShippingUpgrade");
        assert_eq!(profile.upgrades()[0].get("shop_id"), Some(json!(9)));
    }

    #[test]
    fn test_assign_shop_id_without_children() {
        let mut profile = ShippingProfile::from_resource(Resource::new(ShippingProfile::NAME));
        profile.assign_shop_id(&json!(9));
        assert_eq!(profile.get("shop_id"), Some(json!(9)));
        assert!(profile.destinations().is_empty());
        assert!(profile.upgrades().is_empty());
    }
}
