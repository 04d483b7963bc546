//! Ordered sequences of materialized resources.
//!
//! [`Collection<T>`] implements `Deref<Target = [T]>`, so slice methods
//! (`iter`, `len`, `first`, indexing) work directly on it:
//!
//! ```rust,ignore
//! let listings = shop.get_listings(etsy.dispatcher(), Params::new()).await?;
//!
//! println!("{} of {:?} listings", listings.len(), listings.count());
//! for listing in listings.iter() {
//!     println!("{:?}", listing.get("title"));
//! }
//! let first = &listings[0];
//! ```

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::rest::{AsResource, Entity, Property, Resource};

/// An ordered sequence of resources of one entity type.
///
/// Every element carries the same entity type as the collection's label.
/// `uri` is the request URI that produced the collection and `count` is the
/// total result count reported by the API, when present.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T = Resource> {
    entity: String,
    uri: Option<String>,
    count: Option<u64>,
    items: Vec<T>,
}

impl<T> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(entity: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            entity: entity.into(),
            uri,
            count: None,
            items: Vec::new(),
        }
    }

    /// Creates a collection from already-materialized items.
    #[must_use]
    pub fn from_items(entity: impl Into<String>, uri: Option<String>, items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::new(entity, uri)
        }
    }

    /// Sets the total result count.
    #[must_use]
    pub fn with_count(mut self, count: Option<u64>) -> Self {
        self.count = count;
        self
    }

    /// Returns the entity type label.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the request URI that produced this collection.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns the total result count reported by the API.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        self.count
    }

    /// Appends the items of a later page.
    ///
    /// `uri` and `count` follow the later page.
    pub fn extend_with(&mut self, next: Self) {
        self.uri = next.uri.or_else(|| self.uri.take());
        self.count = next.count.or(self.count);
        self.items.extend(next.items);
    }

    /// Adds one item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Takes ownership of the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: AsResource> Collection<T> {
    /// Merges the same fields into every element.
    ///
    /// Used to backfill parent identifiers the API omits per item. Other
    /// fields are unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use etsy_api::rest::{Collection, Resource};
    /// use serde_json::json;
    ///
    /// let mut sections: Collection = Collection::from_items(
    ///     "ShopSection",
    ///     None,
    ///     vec![Resource::new("ShopSection"), Resource::new("ShopSection")],
    /// );
    /// sections.append([("shop_id", json!(9))]);
    ///
    /// assert!(sections.iter().all(|s| s.get("shop_id") == Some(json!(9))));
    /// ```
    pub fn append<I, K>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let fields: Vec<(K, Value)> = fields.into_iter().collect();
        for item in &mut self.items {
            let resource = item.as_resource_mut();
            for (key, value) in &fields {
                resource.set(key.as_ref(), Property::Value(value.clone()));
            }
        }
        self
    }

    /// Expands every element into plain JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.items
                .iter()
                .map(|item| item.as_resource().to_value())
                .collect(),
        )
    }
}

impl Collection<Resource> {
    /// Converts the elements into a typed entity view.
    #[must_use]
    pub fn cast<T: Entity>(self) -> Collection<T> {
        Collection {
            entity: self.entity,
            uri: self.uri,
            count: self.count,
            items: self.items.into_iter().map(T::from_resource).collect(),
        }
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for Collection<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Collection<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn receipt(id: u64) -> Resource {
        let mut resource = Resource::new("Receipt");
        resource.set("receipt_id", id);
        resource.set("status", "paid");
        resource
    }

    fn receipts() -> Collection {
        Collection::from_items(
            "Receipt",
            Some("https://api.etsy.com/v3/application/shops/9/receipts".to_string()),
            vec![receipt(1), receipt(2), receipt(3)],
        )
    }

    #[test]
    fn test_append_backfills_every_element() {
        let mut collection = receipts();
        collection.append([("shop_id", json!(9))]);

        assert_eq!(collection.len(), 3);
        for (i, item) in collection.iter().enumerate() {
            assert_eq!(item.get("shop_id"), Some(json!(9)));
            assert_eq!(item.get("receipt_id"), Some(json!(i + 1)));
            assert_eq!(item.get("status"), Some(json!("paid")));
        }
    }

    #[test]
    fn test_append_overwrites_case_insensitively() {
        let mut collection = receipts();
        collection.append([("STATUS", json!("shipped"))]);

        assert_eq!(
            collection[0].to_value(),
            json!({"receipt_id": 1, "status": "shipped"})
        );
    }

    #[test]
    fn test_append_on_empty_collection() {
        let mut collection: Collection = Collection::new("Receipt", None);
        collection.append([("shop_id", json!(9))]);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_slice_access_and_iteration() {
        let collection = receipts();

        assert_eq!(collection[1].get("receipt_id"), Some(json!(2)));
        assert_eq!(collection.first().unwrap().get("receipt_id"), Some(json!(1)));
        assert_eq!((&collection).into_iter().count(), 3);
        assert_eq!(collection.entity(), "Receipt");
        assert!(collection.uri().unwrap().ends_with("/receipts"));
    }

    #[test]
    fn test_extend_with_next_page() {
        let mut first = Collection::from_items("Receipt", Some("page1".into()), vec![receipt(1)])
            .with_count(Some(2));
        let second = Collection::from_items("Receipt", Some("page2".into()), vec![receipt(2)])
            .with_count(Some(2));

        first.extend_with(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.uri(), Some("page2"));
        assert_eq!(first.count(), Some(2));
    }

    #[test]
    fn test_to_value() {
        let collection = Collection::from_items("Receipt", None, vec![receipt(7)]);
        assert_eq!(
            collection.to_value(),
            json!([{"receipt_id": 7, "status": "paid"}])
        );
    }
}
