use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::OrderType,
    storefront::{CartLine, CustomerDetails},
};

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart: Vec<CartLine>,
    pub customer_details: CustomerDetails,
    pub order_type: OrderType,
    #[schema(value_type = String, example = "34.73")]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub message: String,
    pub order_id: Uuid,
    /// Where the customer is sent to pay.
    pub checkout_url: String,
}
