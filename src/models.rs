use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.99")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Menu item payload without the store-assigned id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.99")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// Why an amount does not fit the `NUMERIC(10,2)` money columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("must not be negative")]
    Negative,

    #[error("must have at most two decimal places")]
    TooPrecise,

    #[error("must not exceed 99999999.99")]
    TooLarge,
}

pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Checks that `amount` is stored exactly: non-negative, cents at most,
/// below the column's limit. Trailing zeros (`12.990`) are accepted.
pub fn check_amount(amount: Decimal) -> Result<(), AmountError> {
    if amount < Decimal::ZERO {
        return Err(AmountError::Negative);
    }
    if amount.normalize().scale() > 2 {
        return Err(AmountError::TooPrecise);
    }
    if amount > max_amount() {
        return Err(AmountError::TooLarge);
    }
    Ok(())
}

impl MenuItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
            && self.is_available.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Pickup,
    Delivery,
}

impl OrderType {
    /// Upper-case token used by the order store.
    pub fn as_token(&self) -> &'static str {
        match self {
            OrderType::Pickup => "PICKUP",
            OrderType::Delivery => "DELIVERY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    ReadyForPickup,
    OutForDelivery,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::ReadyForPickup => "READY_FOR_PICKUP",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token {0:?}")]
pub struct UnknownToken(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY_FOR_PICKUP" => Ok(OrderStatus::ReadyForPickup),
            "OUT_FOR_DELIVERY" => Ok(OrderStatus::OutForDelivery),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

impl FromStr for OrderType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PICKUP" | "pickup" => Ok(OrderType::Pickup),
            "DELIVERY" | "delivery" => Ok(OrderType::Delivery),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    #[schema(value_type = String, example = "34.73")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order row as handed to the store; id and timestamps are assigned there.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String, example = "12.99")]
    pub price: Decimal,
}

/// Line item captured at order time. `price` is the unit price from the cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}
