//! HTTP response types for the Etsy API SDK.
//!
//! This module provides the [`HttpResponse`] type returned by every
//! [`Transport`](crate::clients::Transport), and [`RateLimitInfo`] parsed
//! from Etsy's quota headers.

use std::collections::HashMap;

/// Header carrying the number of calls left in the current second.
pub const REMAINING_THIS_SECOND: &str = "x-remaining-this-second";

/// Quota information parsed from Etsy's rate-limit headers.
///
/// Every field is optional; Etsy omits the headers on some endpoints
/// (notably the OAuth token endpoint).
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use etsy_api::clients::RateLimitInfo;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-remaining-this-second".to_string(), vec!["3".to_string()]);
/// headers.insert("x-limit-per-day".to_string(), vec!["10000".to_string()]);
///
/// let info = RateLimitInfo::from_headers(&headers);
/// assert_eq!(info.remaining_this_second, Some(3));
/// assert_eq!(info.limit_per_day, Some(10_000));
/// assert_eq!(info.remaining_today, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// `x-limit-per-second`
    pub limit_per_second: Option<u32>,
    /// `x-remaining-this-second`
    pub remaining_this_second: Option<u32>,
    /// `x-limit-per-day`
    pub limit_per_day: Option<u32>,
    /// `x-remaining-today`
    pub remaining_today: Option<u32>,
}

impl RateLimitInfo {
    /// Parses quota headers from a lowercase header map.
    ///
    /// Values that are absent or not a non-negative integer parse as `None`.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse::<u32>().ok())
        };

        Self {
            limit_per_second: read("x-limit-per-second"),
            remaining_this_second: read(REMAINING_THIS_SECOND),
            limit_per_day: read("x-limit-per-day"),
            remaining_today: read("x-remaining-today"),
        }
    }
}

/// An HTTP response as returned by a transport.
///
/// The body is kept as raw text; the dispatcher decides whether and how to
/// decode it based on the status code.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keys lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Quota information (from the `x-limit-*` / `x-remaining-*` headers).
    pub rate_limit: RateLimitInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, lowercasing header names and parsing
    /// the quota headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (key, values) in headers {
            normalized
                .entry(key.to_lowercase())
                .or_default()
                .extend(values);
        }
        let rate_limit = RateLimitInfo::from_headers(&normalized);

        Self {
            code,
            headers: normalized,
            body: body.into(),
            rate_limit,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), "{}");
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 429, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), "").is_ok());
        }
    }

    #[test]
    fn test_headers_are_lowercased_and_merged() {
        let mut headers = HashMap::new();
        headers.insert("X-Remaining-This-Second".to_string(), vec!["4".to_string()]);
        headers.insert("Set-Cookie".to_string(), vec!["a=1".to_string()]);
        headers.insert("set-cookie".to_string(), vec!["b=2".to_string()]);

        let response = HttpResponse::new(200, headers, "");

        assert_eq!(response.header("x-remaining-this-second"), Some("4"));
        assert_eq!(response.rate_limit.remaining_this_second, Some(4));
        assert_eq!(response.headers["set-cookie"].len(), 2);
    }

    #[test]
    fn test_rate_limit_ignores_malformed_values() {
        let mut headers = HashMap::new();
        headers.insert(REMAINING_THIS_SECOND.to_string(), vec!["lots".to_string()]);
        headers.insert("x-remaining-today".to_string(), vec!["-1".to_string()]);

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info, RateLimitInfo::default());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
        let response = HttpResponse::new(200, headers, "{}");

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }
}
