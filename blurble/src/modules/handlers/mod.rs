pub mod auth;
pub mod quotes;
pub mod scores;

use crate::modules::models::response::HealthResponse;
use axum::{extract::Extension, http::StatusCode, Json};
use chrono::Utc;
use sqlx::{postgres::Postgres, Pool};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        timestamp: Utc::now(),
    })
}

pub async fn readiness(Extension(pool): Extension<Pool<Postgres>>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("readiness probe failed cause: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
