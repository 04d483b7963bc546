//! The generic materialized entity.
//!
//! A [`Resource`] is an entity type name plus a [`PropertyBag`]: an ordered
//! mapping whose lookups are case-insensitive. The bag never holds two keys
//! that differ only in case; assigning to `Title` when `title` exists
//! overwrites `title` and keeps its casing.
//!
//! Nested API objects named in the entity's association table are stored as
//! [`Property::Resource`] or [`Property::Resources`] and are owned by their
//! parent.
//!
//! # Request templates
//!
//! [`Resource::create_request`] and [`Resource::update_request`] dispatch a
//! request, materialize the response as the same entity, and copy back every
//! returned field the resource *already* has. Fields the resource did not
//! have are not added. The caller's value is mutated in place.
//!
//! [`Resource::delete_request`] reports success as "the response carried no
//! error". A soft 404 therefore reports `false`, and an empty 2xx reports
//! `true`.

use serde_json::{Map, Value};

use crate::clients::{HttpMethod, Params, RequestDispatcher};
use crate::rest::{schema_for, EntitySchema, Materialized, ResourceError, ResourceFactory};

/// A single value in a [`PropertyBag`].
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    /// A plain JSON value.
    Value(Value),
    /// A materialized association.
    Resource(Box<Resource>),
    /// A materialized association list.
    Resources(Vec<Resource>),
}

impl Property {
    /// Expands the property into plain JSON, recursing into resources.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Resource(resource) => resource.to_value(),
            Self::Resources(resources) => {
                Value::Array(resources.iter().map(Resource::to_value).collect())
            }
        }
    }

    /// Returns the plain value, if this is not an association.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<u64> for Property {
    fn from(value: u64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Self::Value(Value::Bool(value))
    }
}

impl From<Resource> for Property {
    fn from(resource: Resource) -> Self {
        Self::Resource(Box::new(resource))
    }
}

impl From<Vec<Resource>> for Property {
    fn from(resources: Vec<Resource>) -> Self {
        Self::Resources(resources)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    canonical: String,
    key: String,
    property: Property,
}

/// An ordered, case-insensitive property map.
///
/// Keys are matched by their ASCII-lowercased form; the casing first seen
/// for a key is kept for serialization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<Entry>,
}

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        let canonical = key.to_ascii_lowercase();
        self.entries.iter().position(|e| e.canonical == canonical)
    }

    /// Returns the property stored under `key`, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.position(key).map(|i| &self.entries[i].property)
    }

    /// Returns a mutable reference to the property stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.position(key).map(|i| &mut self.entries[i].property)
    }

    /// Returns `true` if a property is stored under `key`, ignoring case.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Stores a property, reusing the casing of an existing matching key.
    pub fn set(&mut self, key: &str, property: impl Into<Property>) {
        let property = property.into();
        match self.position(key) {
            Some(i) => self.entries[i].property = property,
            None => self.entries.push(Entry {
                canonical: key.to_ascii_lowercase(),
                key: key.to_string(),
                property,
            }),
        }
    }

    /// Removes and returns the property stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Property> {
        self.position(key).map(|i| self.entries.remove(i).property)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys (original casing) in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Iterates over `(key, property)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.property))
    }

    /// Expands the bag into a JSON object.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.property.to_value()))
            .collect()
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, Property);
    type IntoIter = std::vec::IntoIter<(String, Property)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_iter()
            .map(|e| (e.key, e.property))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// Access to the [`Resource`] behind a typed entity view.
pub trait AsResource {
    /// Returns the underlying resource.
    fn as_resource(&self) -> &Resource;

    /// Returns the underlying resource mutably.
    fn as_resource_mut(&mut self) -> &mut Resource;
}

/// A typed view over a [`Resource`] of a known entity type.
pub trait Entity: AsResource + Sized {
    /// The entity type name.
    const NAME: &'static str;

    /// Wraps a resource. The resource's entity name is not checked.
    fn from_resource(resource: Resource) -> Self;

    /// Unwraps the underlying resource.
    fn into_resource(self) -> Resource;
}

/// A materialized API entity.
///
/// # Example
///
/// ```rust
/// use etsy_api::rest::Resource;
/// use serde_json::json;
///
/// let mut shop = Resource::new("Shop");
/// shop.set("shop_name", "CraftyCorner");
///
/// assert_eq!(shop.get("SHOP_NAME"), Some(json!("CraftyCorner")));
/// assert_eq!(shop.get("missing"), None);
///
/// shop.set("Shop_Name", "Renamed");
/// assert_eq!(shop.to_value(), json!({"shop_name": "Renamed"}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    entity: String,
    properties: PropertyBag,
}

impl Resource {
    /// Creates an empty resource of the given entity type.
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self::with_properties(entity, PropertyBag::new())
    }

    /// Creates a resource from an already-built bag.
    #[must_use]
    pub fn with_properties(entity: impl Into<String>, properties: PropertyBag) -> Self {
        Self {
            entity: entity.into(),
            properties,
        }
    }

    /// Returns the entity type name.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the registered schema for this entity type.
    #[must_use]
    pub fn schema(&self) -> Option<&'static EntitySchema> {
        schema_for(&self.entity)
    }

    /// Returns the property bag.
    #[must_use]
    pub const fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Returns the property bag mutably.
    pub fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }

    /// Reads a field as plain JSON.
    ///
    /// Lookup ignores case. When the field is present and the entity
    /// registers a computed accessor for it, the accessor's result is
    /// returned instead of the raw value. Absent and `null` fields yield
    /// `None`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<Value> {
        let property = self.properties.get(field)?;
        if let Some(accessor) = self.schema().and_then(|s| s.computed(field)) {
            return accessor(self).filter(|v| !v.is_null());
        }
        Some(property.to_value()).filter(|v| !v.is_null())
    }

    /// Returns the raw property without consulting computed accessors.
    #[must_use]
    pub fn raw(&self, field: &str) -> Option<&Property> {
        self.properties.get(field)
    }

    /// Reads a string field.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.raw(field)?.as_value()?.as_str()
    }

    /// Reads an unsigned integer field, accepting numeric strings.
    #[must_use]
    pub fn get_u64(&self, field: &str) -> Option<u64> {
        match self.raw(field)?.as_value()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Returns a nested resource association.
    #[must_use]
    pub fn resource(&self, field: &str) -> Option<&Resource> {
        match self.raw(field)? {
            Property::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns a nested resource-list association.
    #[must_use]
    pub fn resources(&self, field: &str) -> Option<&[Resource]> {
        match self.raw(field)? {
            Property::Resources(resources) => Some(resources),
            _ => None,
        }
    }

    /// Returns a nested resource-list association mutably.
    pub fn resources_mut(&mut self, field: &str) -> Option<&mut Vec<Resource>> {
        match self.properties.get_mut(field)? {
            Property::Resources(resources) => Some(resources),
            _ => None,
        }
    }

    /// Assigns a field, reusing the casing of an existing matching key.
    pub fn set(&mut self, field: &str, value: impl Into<Property>) {
        self.properties.set(field, value);
    }

    /// Returns `true` if the field is present, ignoring case.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.properties.contains(field)
    }

    /// Returns a field formatted as a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if the field is absent, null,
    /// empty, or not a scalar.
    pub fn path_id(&self, field: &'static str) -> Result<String, ResourceError> {
        let segment = match self.raw(field).and_then(Property::as_value) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        segment.ok_or_else(|| ResourceError::MissingField {
            entity: self.entity.clone(),
            field,
        })
    }

    /// Copies every field of `other` that this resource already has.
    pub fn merge_existing(&mut self, other: Self) {
        for (key, property) in other.properties {
            if let Some(existing) = self.properties.get_mut(&key) {
                *existing = property;
            }
        }
    }

    /// Expands the resource into a JSON object, recursing into associations.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.properties.to_map())
    }

    /// Serializes [`Resource::to_value`] as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Dispatches a request and merges the returned fields into `self`.
    ///
    /// A response that does not materialize as a single resource leaves
    /// `self` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn merge_request(
        &mut self,
        client: &RequestDispatcher,
        method: HttpMethod,
        path: &str,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let envelope = client.dispatch(method, path, params).await?;
        if let Materialized::Resource(fresh) = ResourceFactory::materialize(envelope, &self.entity) {
            self.merge_existing(fresh);
        }
        Ok(self)
    }

    /// [`Resource::merge_request`] with `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_request(
        &mut self,
        client: &RequestDispatcher,
        path: &str,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        self.merge_request(client, HttpMethod::Post, path, params)
            .await
    }

    /// [`Resource::merge_request`] with `PUT`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_request(
        &mut self,
        client: &RequestDispatcher,
        path: &str,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        self.merge_request(client, HttpMethod::Put, path, params)
            .await
    }

    /// Sends a `DELETE` and reports whether the response carried no error.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport failures and non-404
    /// error statuses.
    pub async fn delete_request(
        &self,
        client: &RequestDispatcher,
        path: &str,
        params: Params,
    ) -> Result<bool, ResourceError> {
        let envelope = client.delete(path, params).await?;
        Ok(!envelope.has_error())
    }
}

impl AsResource for Resource {
    fn as_resource(&self) -> &Resource {
        self
    }

    fn as_resource_mut(&mut self) -> &mut Resource {
        self
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<PropertyBag>();
};
