use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fpl_shared::PinResponse;
use thiserror::Error;

use crate::config::{MAX_MESSAGE_LEN, MAX_PLAYER_NAME_LEN};
use crate::pin_store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("player_name is required")]
    MissingPlayerName,

    #[error("player_name must be at most {} characters", MAX_PLAYER_NAME_LEN)]
    PlayerNameTooLong,

    #[error("Failed to save pinned players")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_)
            | AppError::MissingPlayerName
            | AppError::PlayerNameTooLong => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Store(source) = &self {
            tracing::error!(error = %source, "pin store write failed");
        }

        (status, Json(PinResponse::failure(self.to_string()))).into_response()
    }
}

/// Rejections from the message endpoint, answered as `{"error": ..}`.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("message must be at most {} characters", MAX_MESSAGE_LEN)]
    TooLong,
}

impl IntoResponse for MessageError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
