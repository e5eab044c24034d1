use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Everything a handler can fail with. Validation failures are caught at the
/// boundary, before any store mutation; internal failures are logged here
/// and surfaced to the caller as an opaque `Server error`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid score data")]
    InvalidScoreData,
    #[error("Score values out of range")]
    ScoreOutOfRange,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    BadRequest(String),
    #[error("No quotes available")]
    NoQuotes,
    #[error("score storage request failed")]
    Storage(#[from] sqlx::Error),
    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token issuing failed")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidScoreData | ApiError::ScoreOutOfRange | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NoQuotes => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Hash(_) | ApiError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed cause: {:?}", self);
            String::from("Server error")
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
