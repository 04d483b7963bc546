//! Request path templates.
//!
//! Resource methods describe their endpoints as templates such as
//! `/application/shops/{shop_id}/listings/{listing_id}`. Each `{field}`
//! placeholder is filled from an explicit argument when one is given, and
//! otherwise from the resource's own property of that name. A missing
//! identifier fails before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use etsy_api::rest::{build_path, build_path_with, Resource};
//!
//! let mut listing = Resource::new("Listing");
//! listing.set("shop_id", 9_u64);
//! listing.set("listing_id", 123_u64);
//!
//! let path = build_path("/application/shops/{shop_id}/listings/{listing_id}", &listing).unwrap();
//! assert_eq!(path, "/application/shops/9/listings/123");
//!
//! let path = build_path_with(
//!     "/application/shops/{shop_id}/listings/{listing_id}/translations/{language}",
//!     &listing,
//!     &[("language", "de".to_string())],
//! )
//! .unwrap();
//! assert_eq!(path, "/application/shops/9/listings/123/translations/de");
//! ```

use crate::rest::{Resource, ResourceError};

/// Fills every placeholder from the resource's properties.
///
/// # Errors
///
/// Returns [`ResourceError::MissingField`] for an absent identifier.
pub fn build_path(template: &'static str, resource: &Resource) -> Result<String, ResourceError> {
    build_path_with(template, resource, &[])
}

/// Fills placeholders from `args` first, then from the resource.
///
/// Values are percent-encoded as path segments.
///
/// # Errors
///
/// Returns [`ResourceError::MissingField`] for an absent identifier.
pub fn build_path_with(
    template: &'static str,
    resource: &Resource,
    args: &[(&str, String)],
) -> Result<String, ResourceError> {
    let mut path = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let field = &rest[start + 1..start + len];
        let value = match args.iter().find(|(name, _)| *name == field) {
            Some((_, value)) => value.clone(),
            None => resource.path_id(field)?,
        };

        path.push_str(&rest[..start]);
        path.push_str(&urlencoding::encode(&value));
        rest = &rest[start + len + 1..];
    }

    path.push_str(rest);
    Ok(path)
}
