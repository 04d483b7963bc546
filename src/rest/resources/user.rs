//! Users and their addresses.

use crate::clients::{HttpMethod, Params, RequestDispatcher};
use crate::rest::resources::{fetch_many, fetch_one, Shop};
use crate::rest::{build_path, build_path_with, Collection, ResourceError};

entity! {
    /// An Etsy user.
    User
}

entity! {
    /// A postal address of the authenticated user.
    UserAddress
}

const ADDRESSES: &str = "/application/user/addresses";
const ADDRESS: &str = "/application/user/addresses/{user_address_id}";
const SHOPS: &str = "/application/users/{user_id}/shops";

impl User {
    /// Returns the user's shop.
    ///
    /// Etsy allows one shop per user, so this endpoint returns a single
    /// shop rather than a list. `None` means the user has no shop.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] without `user_id`, or
    /// [`ResourceError::Http`].
    pub async fn get_shops(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Option<Shop>, ResourceError> {
        let path = build_path(SHOPS, self)?;
        fetch_one(client, HttpMethod::Get, &path, Params::new()).await
    }

    /// Lists the authenticated user's addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_addresses(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<UserAddress>, ResourceError> {
        fetch_many(client, ADDRESSES, params).await
    }

    /// Fetches one of the authenticated user's addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_address(
        &self,
        client: &RequestDispatcher,
        user_address_id: u64,
    ) -> Result<Option<UserAddress>, ResourceError> {
        let path = build_path_with(
            ADDRESS,
            self,
            &[("user_address_id", user_address_id.to_string())],
        )?;
        fetch_one(client, HttpMethod::Get, &path, Params::new()).await
    }
}
