//! Turns response envelopes into resources and collections.
//!
//! [`ResourceFactory::materialize`] decides the shape of a response:
//!
//! | Envelope                                   | Result                        |
//! |--------------------------------------------|-------------------------------|
//! | soft 404, `null` body, non-null `error`    | [`Materialized::NotFound`]    |
//! | object with a `results` key (any value)    | [`Materialized::Collection`]  |
//! | top-level array                            | [`Materialized::Collection`]  |
//! | any other object                           | [`Materialized::Resource`]    |
//!
//! Each record is built by applying the entity's rename table, then its
//! association table (recursively), and wrapping the result in a
//! [`PropertyBag`].

use serde_json::{Map, Value};

use crate::clients::{Envelope, HttpMethod, Params, RequestDispatcher};
use crate::rest::{
    schema_for, Collection, Entity, EntitySchema, Property, PropertyBag, Resource, ResourceError,
};

/// The outcome of materializing one envelope.
#[derive(Clone, Debug, PartialEq)]
pub enum Materialized {
    /// A single resource.
    Resource(Resource),
    /// A list response.
    Collection(Collection),
    /// Nothing to materialize: a soft 404, an empty body, or an error body.
    NotFound {
        /// The request URI.
        uri: String,
    },
}

impl Materialized {
    /// Returns `true` for [`Materialized::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Converts a single-resource result into a typed view.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedShape`] for a collection.
    pub fn into_entity<T: Entity>(self) -> Result<Option<T>, ResourceError> {
        match self {
            Self::Resource(resource) => Ok(Some(T::from_resource(resource))),
            Self::NotFound { .. } => Ok(None),
            Self::Collection(_) => Err(ResourceError::UnexpectedShape {
                entity: T::NAME.to_string(),
                expected: "a single resource",
            }),
        }
    }

    /// Converts a list result into a typed collection.
    ///
    /// A soft 404 becomes an empty collection stamped with the URI.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedShape`] for a single resource.
    pub fn into_collection<T: Entity>(self) -> Result<Collection<T>, ResourceError> {
        match self {
            Self::Collection(collection) => Ok(collection.cast()),
            Self::NotFound { uri } => Ok(Collection::new(T::NAME, Some(uri))),
            Self::Resource(_) => Err(ResourceError::UnexpectedShape {
                entity: T::NAME.to_string(),
                expected: "a collection",
            }),
        }
    }
}

/// Builds resources from decoded JSON.
#[derive(Debug)]
pub struct ResourceFactory;

impl ResourceFactory {
    /// Materializes an envelope as `entity`.
    #[must_use]
    pub fn materialize(envelope: Envelope, entity: &str) -> Materialized {
        let (data, uri) = match envelope {
            Envelope::NotFound { uri, .. } => return Materialized::NotFound { uri },
            Envelope::Data { data, uri } => (data, uri),
        };
        if data.get("error").is_some_and(|e| !e.is_null()) {
            return Materialized::NotFound { uri };
        }

        match data {
            Value::Null => Materialized::NotFound { uri },
            Value::Object(mut map) => match map.remove("results") {
                Some(results) => {
                    let count = map.get("count").and_then(Value::as_u64);
                    let items = Self::records(entity, results);
                    Materialized::Collection(
                        Collection::from_items(entity, Some(uri), items).with_count(count),
                    )
                }
                None => Materialized::Resource(Self::resource(entity, Value::Object(map))),
            },
            Value::Array(records) => Materialized::Collection(Collection::from_items(
                entity,
                Some(uri),
                Self::records(entity, Value::Array(records)),
            )),
            other => {
                tracing::debug!(%uri, entity, body = %other, "Response is not an object, treating as not found");
                Materialized::NotFound { uri }
            }
        }
    }

    /// Dispatches a request and materializes the response as `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn fetch(
        client: &RequestDispatcher,
        method: HttpMethod,
        path: &str,
        entity: &str,
        params: Params,
    ) -> Result<Materialized, ResourceError> {
        let envelope = client.dispatch(method, path, params).await?;
        Ok(Self::materialize(envelope, entity))
    }

    /// Builds one resource, using the registered schema for `entity`.
    ///
    /// Non-object records produce an empty resource.
    #[must_use]
    pub fn resource(entity: &str, record: Value) -> Resource {
        match schema_for(entity) {
            Some(schema) => Self::resource_with_schema(schema, record),
            None => Self::build(entity, None, record),
        }
    }

    /// Builds one resource with an explicit schema.
    #[must_use]
    pub fn resource_with_schema(schema: &EntitySchema, record: Value) -> Resource {
        Self::build(schema.name, Some(schema), record)
    }

    /// Builds a list of resources.
    ///
    /// `null` yields an empty list; a non-array value yields one resource.
    #[must_use]
    pub fn resources(entity: &str, records: Value) -> Vec<Resource> {
        Self::records(entity, records)
    }

    fn records(entity: &str, records: Value) -> Vec<Resource> {
        match records {
            Value::Null => Vec::new(),
            Value::Array(records) => records
                .into_iter()
                .map(|record| Self::resource(entity, record))
                .collect(),
            record => vec![Self::resource(entity, record)],
        }
    }

    fn build(entity: &str, schema: Option<&EntitySchema>, record: Value) -> Resource {
        let Value::Object(map) = record else {
            return Resource::new(entity);
        };
        Resource::with_properties(entity, Self::bag(schema, map))
    }

    fn bag(schema: Option<&EntitySchema>, map: Map<String, Value>) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for (wire, value) in map {
            let key = schema
                .and_then(|s| s.renamed(&wire))
                .map_or(wire, str::to_string);
            let property = match schema.and_then(|s| s.association(&key)) {
                Some(associated) => Self::link(associated, value),
                None => Property::Value(value),
            };
            bag.set(&key, property);
        }
        bag
    }

    fn link(entity: &str, value: Value) -> Property {
        match value {
            Value::Array(records) if records.iter().all(Value::is_object) => Property::Resources(
                records
                    .into_iter()
                    .map(|record| Self::resource(entity, record))
                    .collect(),
            ),
            record @ Value::Object(_) => Property::Resource(Box::new(Self::resource(entity, record))),
            other => Property::Value(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(body: Value) -> Envelope {
        Envelope::Data {
            data: body,
            uri: "https://api.etsy.com/v3/application/test".to_string(),
        }
    }

    static RENAMING: EntitySchema = EntitySchema::new("Renaming")
        .with_renames(&[("old_name", "new_name")])
        .with_associations(&[("new_name", "Shop")]);

    #[test]
    fn test_single_object_materializes_resource() {
        let Materialized::Resource(shop) =
            ResourceFactory::materialize(data(json!({"shop_id": 1, "shop_name": "A"})), "Shop")
        else {
            panic!("expected a resource");
        };
        assert_eq!(shop.entity(), "Shop");
        assert_eq!(shop.to_value(), json!({"shop_id": 1, "shop_name": "A"}));
    }

    #[test]
    fn test_results_key_materializes_collection() {
        let Materialized::Collection(collection) = ResourceFactory::materialize(
            data(json!({"count": 3, "results": [{"listing_id": 1}, {"listing_id": 2}]})),
            "Listing",
        ) else {
            panic!("expected a collection");
        };
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.count(), Some(3));
        assert_eq!(collection.entity(), "Listing");
        assert!(collection.iter().all(|l| l.entity() == "Listing"));
        assert_eq!(collection.uri(), Some("https://api.etsy.com/v3/application/test"));
    }

    #[test]
    fn test_empty_and_null_results_materialize_empty_collection() {
        for results in [json!([]), Value::Null] {
            let materialized =
                ResourceFactory::materialize(data(json!({"count": 0, "results": results})), "Listing");
            let Materialized::Collection(collection) = materialized else {
                panic!("expected a collection");
            };
            assert!(collection.is_empty());
        }
    }

    #[test]
    fn test_soft_404_null_and_error_bodies_are_not_found() {
        let soft = Envelope::NotFound {
            error: Some("Shop not found".to_string()),
            code: 404,
            uri: "u".to_string(),
        };
        assert!(ResourceFactory::materialize(soft, "Shop").is_not_found());
        assert!(ResourceFactory::materialize(data(Value::Null), "Shop").is_not_found());
        assert!(ResourceFactory::materialize(data(json!({"error": "nope"})), "Shop").is_not_found());
        assert!(ResourceFactory::materialize(data(json!(42)), "Shop").is_not_found());
    }

    #[test]
    fn test_null_error_field_is_not_an_error() {
        let materialized =
            ResourceFactory::materialize(data(json!({"shop_id": 1, "error": null})), "Shop");
        assert!(matches!(materialized, Materialized::Resource(_)));
    }

    #[test]
    fn test_rename_moves_value_and_drops_wire_name() {
        let resource = ResourceFactory::resource_with_schema(
            &EntitySchema::new("Plain").with_renames(&[("old_name", "new_name")]),
            json!({"old_name": "value", "other": 1}),
        );
        assert_eq!(resource.get("new_name"), Some(json!("value")));
        assert!(!resource.has("old_name"));
        assert_eq!(resource.get("other"), Some(json!(1)));
    }

    #[test]
    fn test_rename_applies_before_association() {
        let resource =
            ResourceFactory::resource_with_schema(&RENAMING, json!({"old_name": {"shop_id": 4}}));
        let shop = resource.resource("new_name").unwrap();
        assert_eq!(shop.entity(), "Shop");
        assert_eq!(shop.get("shop_id"), Some(json!(4)));
    }

    #[test]
    fn test_array_association_keeps_length_and_type() {
        let listing = ResourceFactory::resource(
            "Listing",
            json!({
                "listing_id": 1,
                "images": [{"listing_image_id": 10}, {"listing_image_id": 11}, {"listing_image_id": 12}],
                "shop": {"shop_id": 9},
            }),
        );

        let images = listing.resources("images").unwrap();
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|i| i.entity() == "ListingImage"));
        assert_eq!(listing.resource("Shop").unwrap().entity(), "Shop");
    }

    #[test]
    fn test_associations_nest() {
        let inventory = ResourceFactory::resource(
            "ListingInventory",
            json!({"products": [{"product_id": 1, "sku": "A"}]}),
        );
        let products = inventory.resources("products").unwrap();
        assert_eq!(products[0].entity(), "ListingProduct");
        assert_eq!(products[0].get("sku"), Some(json!("A")));
    }

    #[test]
    fn test_scalar_association_value_is_kept_raw() {
        let listing = ResourceFactory::resource("Listing", json!({"shop": null, "user": 5}));
        assert_eq!(listing.raw("shop"), Some(&Property::Value(Value::Null)));
        assert_eq!(listing.get("user"), Some(json!(5)));
    }

    #[test]
    fn test_field_order_follows_the_wire() {
        let listing = ResourceFactory::resource(
            "Listing",
            serde_json::from_str(r#"{"zeta":1,"title":"x","alpha":2}"#).unwrap(),
        );

        let keys: Vec<&str> = listing.properties().keys().collect();
        assert_eq!(keys, ["zeta", "title", "alpha"]);
        assert_eq!(listing.to_json(), r#"{"zeta":1,"title":"x","alpha":2}"#);
        let owned: Vec<String> = listing
            .properties()
            .clone()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(owned, ["zeta", "title", "alpha"]);
    }

    #[test]
    fn test_materialization_is_idempotent() {
        let record = json!({"listing_id": 1, "title": "Lamp", "images": [{"listing_image_id": 2}]});
        let a = ResourceFactory::resource("Listing", record.clone());
        let b = ResourceFactory::resource("Listing", record);
        assert_eq!(a.to_value(), b.to_value());
    }

    #[test]
    fn test_into_collection_of_not_found_is_empty_with_uri() {
        let collection = Materialized::NotFound {
            uri: "u".to_string(),
        }
        .into_collection::<crate::rest::resources::Listing>()
        .unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.uri(), Some("u"));
    }

    #[test]
    fn test_shape_mismatch_errors() {
        let single = Materialized::Resource(Resource::new("Shop"));
        assert!(matches!(
            single.into_collection::<crate::rest::resources::Shop>(),
            Err(ResourceError::UnexpectedShape { .. })
        ));

        let list = Materialized::Collection(Collection::new("Shop", None));
        assert!(matches!(
            list.into_entity::<crate::rest::resources::Shop>(),
            Err(ResourceError::UnexpectedShape { .. })
        ));
    }
}
