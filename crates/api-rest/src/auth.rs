//! Bearer-token authentication for the REST API.
//!
//! The core only ever consumes the `{ id, role }` pair; issuing and
//! verifying tokens is purely an HTTP-layer concern. Tokens are JWTs signed
//! with the configured secret and carry the staff id, role and expiry.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wardline_core::StaffMember;
use wardline_types::StaffRole;

/// Token-signing configuration, resolved once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    token_ttl_hours: i64,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: StaffRole,
    exp: i64,
}

/// Issues a signed token for a staff member.
pub fn issue_token(cfg: &AuthConfig, staff: &StaffMember) -> Result<String, ApiError> {
    let claims = Claims {
        sub: staff.id,
        role: staff.role,
        exp: (chrono::Utc::now() + chrono::Duration::hours(cfg.token_ttl_hours)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("token signing failed: {err}");
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
        )
    })
}

/// The identity the core consumes: who is calling and whether they are an
/// admin. Extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: StaffRole,
}

impl AuthUser {
    /// Gate for admin-only operations.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Not authorized"))
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Missing or invalid token"))?;

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(app.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

        Ok(AuthUser {
            id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
