//! Normalized result of a dispatched request.

use serde_json::{json, Value};

/// The outcome of a successful or softly-failed dispatch.
///
/// Every envelope carries the URI that was requested, so collections built
/// from it know where they came from.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use etsy_api::clients::Envelope;
///
/// let found = Envelope::Data {
///     data: json!({"shop_id": 1}),
///     uri: "https://api.etsy.com/v3/application/shops/1".to_string(),
/// };
/// assert!(!found.has_error());
///
/// let missing = Envelope::NotFound {
///     error: Some("Shop not found".to_string()),
///     code: 404,
///     uri: "https://api.etsy.com/v3/application/shops/2".to_string(),
/// };
/// assert!(missing.has_error());
/// assert_eq!(missing.to_value()["code"], 404);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    /// A 2xx response. `data` is `Null` when the body was empty.
    Data {
        /// The decoded response body.
        data: Value,
        /// The requested URI.
        uri: String,
    },
    /// A 404 downgraded to a "not found" result.
    NotFound {
        /// The provider's error string, if the body carried one.
        error: Option<String>,
        /// The HTTP status code (always 404 today).
        code: u16,
        /// The requested URI.
        uri: String,
    },
}

impl Envelope {
    /// Returns the requested URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Data { uri, .. } | Self::NotFound { uri, .. } => uri,
        }
    }

    /// Returns the decoded body for a 2xx response.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Data { data, .. } => Some(data),
            Self::NotFound { .. } => None,
        }
    }

    /// Returns `true` for a soft 404 or a body carrying a non-null `error`.
    #[must_use]
    pub fn has_error(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Data { data, .. } => data.get("error").is_some_and(|e| !e.is_null()),
        }
    }

    /// Returns the envelope in its wire shape.
    ///
    /// Object bodies gain a `uri` key. A soft 404 becomes
    /// `{uri, error, code}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Data { data, uri } => match data {
                Value::Object(map) => {
                    let mut map = map.clone();
                    map.insert("uri".to_string(), Value::String(uri.clone()));
                    Value::Object(map)
                }
                other => other.clone(),
            },
            Self::NotFound { error, code, uri } => json!({
                "uri": uri,
                "error": error,
                "code": code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope_with_error_field_reports_error() {
        let envelope = Envelope::Data {
            data: json!({"error": "Listing is not active"}),
            uri: "u".to_string(),
        };
        assert!(envelope.has_error());
    }

    #[test]
    fn test_null_error_field_is_not_an_error() {
        let envelope = Envelope::Data {
            data: json!({"error": null, "listing_id": 1}),
            uri: "u".to_string(),
        };
        assert!(!envelope.has_error());
    }

    #[test]
    fn test_empty_body_is_not_an_error() {
        let envelope = Envelope::Data {
            data: Value::Null,
            uri: "u".to_string(),
        };
        assert!(!envelope.has_error());
        assert_eq!(envelope.to_value(), Value::Null);
    }

    #[test]
    fn test_to_value_stamps_uri_on_objects() {
        let envelope = Envelope::Data {
            data: json!({"count": 0, "results": []}),
            uri: "https://api.etsy.com/v3/application/listings/active".to_string(),
        };
        let value = envelope.to_value();
        assert_eq!(
            value["uri"],
            "https://api.etsy.com/v3/application/listings/active"
        );
        assert_eq!(value["count"], 0);
    }
}
