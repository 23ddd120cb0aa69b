use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        menu::{MenuItemIdQuery, MenuItemList, UpdateMenuItemRequest},
        orders::{OrderList, OrderWithItems},
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{MenuItem, NewMenuItem},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{menu_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/menu-items",
            get(list_menu_items)
                .post(create_menu_item)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/admin/menu-items",
    responses(
        (status = 200, description = "All menu items (admin only)", body = ApiResponse<MenuItemList>),
        (status = 401, description = "Unauthorized"),
        (status = 303, description = "Signed in but not an admin, redirected to /"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_menu_items(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<MenuItemList>>> {
    let resp = menu_service::list_menu_items(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/menu-items",
    request_body = NewMenuItem,
    responses(
        (status = 201, description = "Menu item created", body = ApiResponse<MenuItem>),
        (status = 400, description = "Invalid menu item"),
        (status = 401, description = "Unauthorized"),
        (status = 303, description = "Signed in but not an admin, redirected to /"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<NewMenuItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    let resp = menu_service::create_menu_item(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/menu-items",
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = ApiResponse<MenuItem>),
        (status = 400, description = "Missing id or invalid fields"),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthorized"),
        (status = 303, description = "Signed in but not an admin, redirected to /"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::update_menu_item(&state, &admin, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/menu-items",
    params(MenuItemIdQuery),
    responses(
        (status = 200, description = "Menu item deleted", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthorized"),
        (status = 303, description = "Signed in but not an admin, redirected to /"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<MenuItemIdQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = menu_service::delete_menu_item(&state, &admin, query.id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status, e.g. PENDING"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Placed orders (admin only)", body = ApiResponse<OrderList>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its items (admin only)", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::get_order(&state, &admin, id).await?;
    Ok(Json(resp))
}
