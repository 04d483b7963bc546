//! OAuth permission scopes for the Etsy API.
//!
//! This module provides the [`PermissionScopes`] type for validating and
//! formatting the scopes requested during authorization.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Every permission scope the Etsy Open API v3 recognises.
pub const ALL_SCOPES: &[&str] = &[
    "address_r",
    "address_w",
    "billing_r",
    "cart_r",
    "cart_w",
    "email_r",
    "favorites_r",
    "favorites_w",
    "feedback_r",
    "listings_d",
    "listings_r",
    "listings_w",
    "profile_r",
    "profile_w",
    "recommend_r",
    "recommend_w",
    "shops_r",
    "shops_w",
    "transactions_r",
    "transactions_w",
];

/// An ordered, de-duplicated set of Etsy permission scopes.
///
/// Etsy expects scopes space-separated in the authorization URL, which is
/// what [`Display`](fmt::Display) produces. Parsing accepts commas, spaces,
/// or a mix, and rejects anything not in [`ALL_SCOPES`].
///
/// # Example
///
/// ```rust
/// use etsy_api::PermissionScopes;
///
/// let scopes: PermissionScopes = "listings_r, shops_r listings_r".parse().unwrap();
/// assert_eq!(scopes.to_string(), "listings_r shops_r");
/// assert!(scopes.contains("shops_r"));
///
/// assert!("listings_x".parse::<PermissionScopes>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PermissionScopes {
    scopes: Vec<String>,
}

impl PermissionScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a set containing every known scope.
    #[must_use]
    pub fn all() -> Self {
        Self {
            scopes: ALL_SCOPES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Adds a scope, ignoring duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidScope`] if the scope is not recognised.
    pub fn insert(&mut self, scope: &str) -> Result<(), ConfigError> {
        let scope = scope.trim();
        if !ALL_SCOPES.contains(&scope) {
            return Err(ConfigError::InvalidScope {
                scope: scope.to_string(),
            });
        }
        if !self.contains(scope) {
            self.scopes.push(scope.to_string());
        }
        Ok(())
    }

    /// Returns `true` if the scope is present.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns an iterator over the scopes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }
}

impl FromStr for PermissionScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::new();
        for scope in s.split([',', ' ']).filter(|s| !s.trim().is_empty()) {
            scopes.insert(scope)?;
        }
        Ok(scopes)
    }
}

impl TryFrom<&[&str]> for PermissionScopes {
    type Error = ConfigError;

    fn try_from(values: &[&str]) -> Result<Self, Self::Error> {
        let mut scopes = Self::new();
        for scope in values {
            scopes.insert(scope)?;
        }
        Ok(scopes)
    }
}

impl fmt::Display for PermissionScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scopes.join(" "))
    }
}

impl Serialize for PermissionScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PermissionScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_comma_and_space_separated() {
        let scopes: PermissionScopes = "email_r,listings_w  shops_r".parse().unwrap();
        let collected: Vec<&str> = scopes.iter().collect();
        assert_eq!(collected, vec!["email_r", "listings_w", "shops_r"]);
    }

    #[test]
    fn test_display_is_space_joined_in_insertion_order() {
        let scopes = PermissionScopes::try_from(&["shops_r", "email_r", "shops_r"][..]).unwrap();
        assert_eq!(scopes.to_string(), "shops_r email_r");
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let result: Result<PermissionScopes, _> = "listings_r,read_products".parse();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidScope { scope }) if scope == "read_products"
        ));
    }

    #[test]
    fn test_all_contains_every_known_scope() {
        let all = PermissionScopes::all();
        assert_eq!(all.iter().count(), ALL_SCOPES.len());
        assert!(all.contains("transactions_w"));
    }

    #[test]
    fn test_empty_string_parses_to_empty_set() {
        let scopes: PermissionScopes = " , ".parse().unwrap();
        assert!(scopes.is_empty());
        assert_eq!(scopes.to_string(), "");
    }

    #[test]
    fn test_serde_round_trip() {
        let original: PermissionScopes = "listings_r shops_w".parse().unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""listings_r shops_w""#);
        let back: PermissionScopes = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
