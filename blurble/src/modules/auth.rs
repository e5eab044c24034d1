use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts};
use chrono::{DateTime, Duration, Utc};
use http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

const TOKEN_TTL_DAYS: i64 = 7;
const DEFAULT_SECRET: &str = "blurble-secret-key-change-in-production";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id (standard `sub` claim).
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies the bearer tokens handed out at login. Constructed
/// once at startup and injected into the router; handlers never read the
/// secret themselves.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET environment variable is not set. A built-in development secret will be used."
            );
            String::from(DEFAULT_SECRET)
        });
        Self::new(&secret)
    }

    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id,
            username: String::from(username),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

/// The identity behind a request, resolved from the `Authorization: Bearer`
/// header. Handlers that take this extractor reject unauthenticated
/// requests with 401 before running.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let issuer = parts
            .extensions
            .get::<TokenIssuer>()
            .ok_or(ApiError::Unauthorized)?;

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = issuer.verify(token).map_err(|e| {
            tracing::debug!("token rejected cause: {:?}", e);
            ApiError::Unauthorized
        })?;

        Ok(AuthenticatedUser {
            id: claims.sub,
            username: claims.username,
        })
    }
}
