//! Resource materialization for the Etsy Open API.
//!
//! Responses are not decoded into fixed structs. The API's field casing and
//! shape vary between endpoints, so each response becomes a [`Resource`]:
//! an entity type name plus a case-insensitive [`PropertyBag`].
//!
//! - [`ResourceFactory`] turns an [`Envelope`](crate::clients::Envelope)
//!   into a [`Materialized`] result: a single resource, a [`Collection`], or
//!   `NotFound`.
//! - [`EntitySchema`] holds each entity's rename table, association table
//!   and computed fields.
//! - [`resources`] provides typed views ([`Listing`](resources::Listing),
//!   [`Shop`](resources::Shop), ...) with their endpoints.
//! - [`build_path`] fills request path templates from a resource's fields.
//!
//! # Example
//!
//! ```rust
//! use etsy_api::clients::Envelope;
//! use etsy_api::rest::{Materialized, ResourceFactory};
//! use serde_json::json;
//!
//! let envelope = Envelope::Data {
//!     data: json!({"count": 1, "results": [{"listing_id": 1, "Images": [{"listing_image_id": 2}]}]}),
//!     uri: "https://api.etsy.com/v3/application/listings/batch?listing_ids=1".to_string(),
//! };
//!
//! let Materialized::Collection(listings) = ResourceFactory::materialize(envelope, "Listing") else {
//!     panic!("expected a collection");
//! };
//! assert_eq!(listings.len(), 1);
//! assert_eq!(listings[0].resources("images").unwrap()[0].entity(), "ListingImage");
//! ```

mod collection;
mod errors;
mod factory;
mod path;
mod resource;
pub mod resources;
mod schema;

pub use collection::Collection;
pub use errors::ResourceError;
pub use factory::{Materialized, ResourceFactory};
pub use path::{build_path, build_path_with};
pub use resource::{AsResource, Entity, Property, PropertyBag, Resource};
pub use schema::{schema_for, ComputedField, EntitySchema};
