//! Receipts, shipments and transactions.

use crate::clients::{Params, RequestDispatcher};
use crate::rest::resources::{fetch_many, Listing};
use crate::rest::{build_path, Collection, EntitySchema, Resource, ResourceError};

entity! {
    /// A shop receipt: one buyer's order.
    Receipt
}

entity! {
    /// A tracked shipment on a receipt.
    Shipment
}

entity! {
    /// One purchased line item.
    Transaction
}

pub(crate) static RECEIPT_SCHEMA: EntitySchema =
    EntitySchema::new("Receipt").with_associations(&[("shipments", "Shipment")]);

const TRACKING: &str = "/application/shops/{shop_id}/receipts/{receipt_id}/tracking";
const TRANSACTIONS: &str = "/application/shops/{shop_id}/receipts/{receipt_id}/transactions";
const LISTINGS: &str = "/application/shops/{shop_id}/receipts/{receipt_id}/listings";

impl Receipt {
    /// Submits tracking information and refreshes the fields this value
    /// already has (for example `is_shipped` and `shipments`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn create_shipment(
        &mut self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<&mut Self, ResourceError> {
        let path = build_path(TRACKING, self)?;
        self.0.create_request(client, &path, params).await?;
        Ok(self)
    }

    /// Lists the receipt's transactions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_transactions(
        &self,
        client: &RequestDispatcher,
    ) -> Result<Collection<Transaction>, ResourceError> {
        let path = build_path(TRANSACTIONS, self)?;
        fetch_many(client, &path, Params::new()).await
    }

    /// Lists the listings bought on this receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] or [`ResourceError::Http`].
    pub async fn get_listings(
        &self,
        client: &RequestDispatcher,
        params: Params,
    ) -> Result<Collection<Listing>, ResourceError> {
        let path = build_path(LISTINGS, self)?;
        fetch_many(client, &path, params).await
    }

    /// Returns the receipt's shipments.
    #[must_use]
    pub fn shipments(&self) -> &[Resource] {
        self.resources("shipments").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{Entity, ResourceFactory};
    use serde_json::json;

    #[test]
    fn test_shipments_materialize_as_shipment_resources() {
        let receipt = Receipt::from_resource(ResourceFactory::resource(
            "Receipt",
            json!({
                "receipt_id": 3,
                "shop_id": 7,
                "shipments": [{"receipt_shipping_id": 1, "tracking_code": "1Z999"}]
            }),
        ));

        assert_eq!(receipt.shipments().len(), 1);
        assert_eq!(receipt.shipments()[0].entity(), "Shipment");
        assert_eq!(receipt.shipments()[0].get_str("tracking_code"), Some("1Z999"));
    }

    #[test]
    fn test_tracking_path_needs_receipt_id() {
        let receipt =
            Receipt::from_resource(ResourceFactory::resource("Receipt", json!({"shop_id": 7})));

        let error = build_path(TRACKING, &receipt).unwrap_err();

        assert!(matches!(
            error,
            ResourceError::MissingField { field: "receipt_id", .. }
        ));
    }
}
