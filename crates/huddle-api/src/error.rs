use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use huddle_store::StoreError;

/// Failures that end the current request with a 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to save message: {0}")]
    Save(#[source] StoreError),

    #[error("failed to load messages: {0}")]
    Load(#[source] StoreError),

    #[error("session store unavailable: {0}")]
    Session(#[source] StoreError),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let body = match &self {
            ApiError::Save(_) => "Error saving message",
            ApiError::Load(_) => "Error loading messages",
            ApiError::Session(_) | ApiError::Task(_) => "Internal error",
        };

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
