//! Registration, login and account approval endpoints.

use crate::auth::{issue_token, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_core::{HospitalError, NewStaff, StaffView};
use wardline_types::{NonEmptyText, Shift, StaffRole};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/pending", get(pending))
        .route("/approve/:id", put(approve))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: StaffRole,
    pub department: Option<String>,
    pub contact: Option<String>,
    pub specialization: Option<String>,
    pub shift: Option<Shift>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct AuthRes {
    pub token: String,
    pub user: StaffView,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 200, description = "Account created", body = AuthRes),
        (status = 400, description = "Duplicate email or invalid input", body = crate::error::ErrorBody)
    )
)]
/// Registers a staff account and returns a session token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<Json<AuthRes>, ApiError> {
    let new = NewStaff {
        name: NonEmptyText::new(&req.name).map_err(HospitalError::from)?,
        email: NonEmptyText::new(&req.email).map_err(HospitalError::from)?,
        password: req.password,
        role: req.role,
        department: req.department,
        contact: req.contact,
        specialization: req.specialization,
        shift: req.shift,
    };

    let staff = state.accounts.register(new)?;
    let token = issue_token(&state.auth, &staff)?;

    Ok(Json(AuthRes {
        token,
        user: StaffView::from(&staff),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = AuthRes),
        (status = 400, description = "Invalid credentials or pending approval", body = crate::error::ErrorBody)
    )
)]
/// Verifies credentials and returns a fresh session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<AuthRes>, ApiError> {
    let staff = state.accounts.authenticate(&req.email, &req.password)?;
    let token = issue_token(&state.auth, &staff)?;

    Ok(Json(AuthRes {
        token,
        user: StaffView::from(&staff),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current staff record", body = StaffView),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Returns the record of the authenticated staff member.
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<StaffView>, ApiError> {
    let staff = state.accounts.get(user.id)?;
    Ok(Json(StaffView::from(&staff)))
}

#[utoipa::path(
    get,
    path = "/api/auth/pending",
    responses(
        (status = 200, description = "Accounts awaiting approval", body = [StaffView]),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody)
    )
)]
/// Lists accounts awaiting admin approval. Admin only.
pub async fn pending(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<StaffView>>, ApiError> {
    user.require_admin()?;
    let views = state.accounts.pending().iter().map(StaffView::from).collect();
    Ok(Json(views))
}

#[utoipa::path(
    put,
    path = "/api/auth/approve/{id}",
    responses(
        (status = 200, description = "Account approved", body = StaffView),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown staff member", body = crate::error::ErrorBody)
    )
)]
/// Approves a pending account. Admin only.
pub async fn approve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffView>, ApiError> {
    user.require_admin()?;
    let staff = state.accounts.approve(id)?;
    Ok(Json(StaffView::from(&staff)))
}
