//! Route modules and the handful of top-level endpoints.

pub mod auth;
pub mod beds;
pub mod patients;
pub mod staff;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;
use wardline_core::{reconcile, ConsistencyIssue};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness endpoint for monitoring and load balancers. No auth.
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Wardline API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/admin/reconcile",
    responses(
        (status = 200, description = "Detected bed/patient inconsistencies (empty when healthy)", body = [ConsistencyIssue]),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody)
    )
)]
/// Runs the bed/patient cross-reference check. Admin only.
pub async fn run_reconcile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ConsistencyIssue>>, ApiError> {
    user.require_admin()?;
    let issues = reconcile(&state.registry);
    if !issues.is_empty() {
        tracing::warn!(count = issues.len(), "reconciliation found inconsistencies");
    }
    Ok(Json(issues))
}
