use uuid::Uuid;

use crate::{
    dto::menu::{MenuItemList, UpdateMenuItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{MenuItem, NewMenuItem, check_amount},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Whole catalog, newest first. Unavailable items are included; the
/// storefront shows them without an add button.
pub async fn list_menu(state: &AppState) -> AppResult<ApiResponse<MenuItemList>> {
    let items = state
        .catalog
        .list_menu_items()
        .await
        .map_err(|e| AppError::from_store("list_menu_items", "Failed to fetch menu items", e))?;

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Menu items",
        MenuItemList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn list_menu_items(
    state: &AppState,
    _admin: &AdminUser,
) -> AppResult<ApiResponse<MenuItemList>> {
    list_menu(state).await
}

pub async fn create_menu_item(
    state: &AppState,
    admin: &AdminUser,
    payload: NewMenuItem,
) -> AppResult<ApiResponse<MenuItem>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    check_amount(payload.price).map_err(|e| AppError::BadRequest(format!("price {e}")))?;

    let item = state
        .catalog
        .create_menu_item(payload)
        .await
        .map_err(|e| AppError::from_store("create_menu_item", "Failed to create menu item", e))?;

    tracing::info!(admin = %admin.0.user_id, menu_item_id = %item.id, "menu item created");
    Ok(ApiResponse::success(
        "Menu item created",
        item,
        Some(Meta::empty()),
    ))
}

pub async fn update_menu_item(
    state: &AppState,
    admin: &AdminUser,
    payload: UpdateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    let (id, patch) = payload.into_parts();
    let id = id.ok_or_else(|| AppError::BadRequest("Menu item ID is required for update".into()))?;

    if patch.is_empty() {
        return Err(AppError::BadRequest("no fields to update".into()));
    }
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if let Some(price) = patch.price {
        check_amount(price).map_err(|e| AppError::BadRequest(format!("price {e}")))?;
    }

    let item = state
        .catalog
        .update_menu_item(id, patch)
        .await
        .map_err(|e| AppError::from_store("update_menu_item", "Failed to update menu item", e))?;

    tracing::info!(admin = %admin.0.user_id, menu_item_id = %item.id, "menu item updated");
    Ok(ApiResponse::success("Updated", item, Some(Meta::empty())))
}

pub async fn delete_menu_item(
    state: &AppState,
    admin: &AdminUser,
    id: Option<Uuid>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let id =
        id.ok_or_else(|| AppError::BadRequest("Menu item ID is required for deletion".into()))?;

    state
        .catalog
        .delete_menu_item(id)
        .await
        .map_err(|e| AppError::from_store("delete_menu_item", "Failed to delete menu item", e))?;

    tracing::info!(admin = %admin.0.user_id, menu_item_id = %id, "menu item deleted");
    Ok(ApiResponse::success(
        "Menu item deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
