use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::checkout::{CheckoutConfirmation, CheckoutRequest},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order stored, payment redirect returned", body = ApiResponse<CheckoutConfirmation>),
        (status = 400, description = "Empty cart, missing customer details or inconsistent cart"),
        (status = 500, description = "Failed to process order"),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutConfirmation>>> {
    let resp = order_service::checkout(&state, payload).await?;
    Ok(Json(resp))
}
