use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{MenuItem, MenuItemPatch};

/// Body of `PUT /api/admin/menu-items`: the id plus whichever fields change.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "12.99")]
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

impl UpdateMenuItemRequest {
    pub fn into_parts(self) -> (Option<Uuid>, MenuItemPatch) {
        let patch = MenuItemPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            is_available: self.is_available,
        };
        (self.id, patch)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MenuItemIdQuery {
    /// Menu item to delete.
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MenuItemList {
    #[schema(value_type = Vec<MenuItem>)]
    pub items: Vec<MenuItem>,
}
