use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta},
    store::StoreError,
    storefront::ValidationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not on the admin allow-list; answered with a redirect.
    #[error("Forbidden")]
    NotAdmin,

    /// Storage failure already logged by the caller; only the message is shown.
    #[error("{0}")]
    Storage(&'static str),

    #[error("Storage error")]
    Store(#[from] StoreError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotAdmin => StatusCode::SEE_OTHER,
            AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Maps a store error from `operation`, logging the detail and keeping it
    /// out of the response.
    pub fn from_store(operation: &'static str, message: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            other => {
                tracing::error!(operation, error = %other, "storage operation failed");
                AppError::Storage(message)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::NotAdmin = self {
            return Redirect::to("/").into_response();
        }
        if let AppError::Store(err) = &self {
            tracing::error!(error = %err, "unhandled storage error");
        }
        if let AppError::Internal(err) = &self {
            tracing::error!(error = %err, "internal error");
        }

        let status = self.status_code();
        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
