use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::menu::MenuItemList, error::AppResult, response::ApiResponse, services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_menu))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Full menu, newest first", body = ApiResponse<MenuItemList>),
        (status = 500, description = "Failed to fetch menu items"),
    ),
    tag = "Menu"
)]
pub async fn list_menu(State(state): State<AppState>) -> AppResult<Json<ApiResponse<MenuItemList>>> {
    let resp = menu_service::list_menu(&state).await?;
    Ok(Json(resp))
}
