//! Request parameters.
//!
//! [`Params`] is an ordered list of named values. How it reaches the wire
//! depends on the HTTP method: a query string for GET and DELETE, a form
//! body for POST, PUT and PATCH, or a single-file multipart body when an
//! `image` parameter is present.
//!
//! # Example
//!
//! ```rust
//! use etsy_api::clients::Params;
//!
//! let params = Params::new()
//!     .with("listing_ids", vec![1_u64, 2, 3])
//!     .with("includes", Vec::<String>::new())
//!     .with("limit", 25);
//!
//! assert_eq!(
//!     params.to_pairs(),
//!     vec![
//!         ("listing_ids".to_string(), "1,2,3".to_string()),
//!         ("limit".to_string(), "25".to_string()),
//!     ]
//! );
//! ```

use serde_json::{Map, Value};

use crate::clients::http_request::FilePart;

/// Name of the parameter that switches a request to multipart.
pub const IMAGE_PARAM: &str = "image";

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A scalar value, sent as-is.
    Text(String),
    /// A sequence, sent comma-joined. Omitted entirely when empty.
    List(Vec<String>),
    /// A file, sent as a multipart part.
    File(FilePart),
}

impl ParamValue {
    fn to_wire(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::List(items) if items.is_empty() => None,
            Self::List(items) => Some(items.join(",")),
            Self::File(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<FilePart> for ParamValue {
    fn from(value: FilePart) -> Self {
        Self::File(value)
    }
}

macro_rules! text_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

text_from_display!(u8, u16, u32, u64, usize, i32, i64, f64);

impl<T: ToString> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// An ordered set of request parameters.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a parameter and returns `self`, for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, replacing any existing value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes and returns the value for `key`.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the wire form of every non-file parameter.
    ///
    /// Lists are comma-joined and empty lists are dropped.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.to_wire().map(|wire| (key.clone(), wire)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Converts a JSON object into parameters.
///
/// Strings are sent verbatim, arrays become lists, `null` is skipped, and
/// nested objects are sent as their JSON text.
impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => ParamValue::Text(s),
                    Value::Array(items) => ParamValue::List(
                        items
                            .into_iter()
                            .map(|item| match item {
                                Value::String(s) => s,
                                other => other.to_string(),
                            })
                            .collect(),
                    ),
                    other => ParamValue::Text(other.to_string()),
                };
                Some((key, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_existing_key_in_place() {
        let params = Params::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::Text("3".to_string())));
    }

    #[test]
    fn test_lists_are_comma_joined_and_empty_lists_dropped() {
        let params = Params::new()
            .with("includes", vec!["Images", "Shop"])
            .with("empty", Vec::<u64>::new());

        assert_eq!(
            params.to_pairs(),
            vec![("includes".to_string(), "Images,Shop".to_string())]
        );
    }

    #[test]
    fn test_files_are_excluded_from_pairs() {
        let params = Params::new()
            .with("image", FilePart::new("a.jpg", vec![1]))
            .with("rank", 1_u32);

        assert_eq!(params.to_pairs().len(), 1);
        assert!(matches!(params.get(IMAGE_PARAM), Some(ParamValue::File(_))));
    }

    #[test]
    fn test_from_json_object() {
        let Value::Object(map) = json!({
            "title": "Mug",
            "quantity": 3,
            "is_supply": false,
            "tags": ["blue", 7],
            "shipping_profile_id": null
        }) else {
            unreachable!()
        };

        let params = Params::from(map);

        assert_eq!(params.get("title"), Some(&ParamValue::Text("Mug".into())));
        assert_eq!(params.get("quantity"), Some(&ParamValue::Text("3".into())));
        assert_eq!(
            params.get("is_supply"),
            Some(&ParamValue::Text("false".into()))
        );
        assert_eq!(
            params.get("tags"),
            Some(&ParamValue::List(vec!["blue".into(), "7".into()]))
        );
        assert!(!params.contains("shipping_profile_id"));
    }

    #[test]
    fn test_remove() {
        let mut params = Params::new().with("a", 1_u64);
        assert!(params.remove("a").is_some());
        assert!(params.is_empty());
        assert!(params.remove("a").is_none());
    }
}
