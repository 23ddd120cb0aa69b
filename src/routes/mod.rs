use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware::from_fn_with_state,
    routing::get,
};

use crate::{
    middleware::auth::resolve_identity,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod admin;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod menu;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/menu", menu::router())
        .nest("/checkout", checkout::router())
        .nest("/admin", admin::router())
        .layer(from_fn_with_state(state, resolve_identity))
}

/// Full application router with state bound, without the transport layers
/// added in `main`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router(state.clone()))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
