use crate::error::{ApiError, ApiResult};
use crate::modules::{
    auth::TokenIssuer,
    models::{
        request::{LoginRequest, RegisterRequest},
        response::{AuthResponse, UserResponse},
    },
    store::PgUserStore,
};
use axum::{extract::Extension, Json};
use chrono::Utc;
use std::sync::Arc;

const BCRYPT_COST: u32 = 10;
const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 6;

pub async fn register(
    Extension(users): Extension<Arc<PgUserStore>>,
    Extension(issuer): Extension<TokenIssuer>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (username, password) = match (request.username, request.password) {
        (Some(username), Some(password)) => (username, password),
        _ => {
            return Err(ApiError::BadRequest(String::from(
                "Username and password required",
            )))
        }
    };

    let length = username.chars().count();
    if length < USERNAME_MIN || length > USERNAME_MAX {
        return Err(ApiError::BadRequest(String::from(
            "Username must be 3-20 characters",
        )));
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ApiError::BadRequest(String::from(
            "Password must be at least 6 characters",
        )));
    }

    if users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::BadRequest(String::from("Username already taken")));
    }

    let password_hash = bcrypt::hash(&password, BCRYPT_COST)?;
    let user = users.create(&username, &password_hash).await?;
    let token = issuer.issue(user.id, &user.username, Utc::now())?;

    tracing::info!("registered user {}", user.username);

    Ok(Json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

pub async fn login(
    Extension(users): Extension<Arc<PgUserStore>>,
    Extension(issuer): Extension<TokenIssuer>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (username, password) = match (request.username, request.password) {
        (Some(username), Some(password)) => (username, password),
        _ => {
            return Err(ApiError::BadRequest(String::from(
                "Username and password required",
            )))
        }
    };

    let user = users
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !bcrypt::verify(&password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = issuer.issue(user.id, &user.username, Utc::now())?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}
