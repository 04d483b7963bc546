//! Seller taxonomy nodes and their properties.

use crate::clients::{Params, RequestDispatcher};
use crate::rest::resources::fetch_many;
use crate::rest::{build_path, Collection, ResourceError};

entity! {
    /// A node of the seller taxonomy tree.
    Taxonomy
}

entity! {
    /// A property that listings in a taxonomy node can set.
    TaxonomyProperty
}

const PROPERTIES: &str = "/application/seller-taxonomy/nodes/{id}/properties";

impl Taxonomy {
    /// Lists the properties available to listings in this node.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] without `id`, or
    /// [`ResourceError::Http`].
    pub async fn get_properties(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Collection<TaxonomyProperty>, ResourceError> {
        let path = build_path(PROPERTIES, self)?;
        fetch_many(client, &path, Params::new()).await
    }
}
