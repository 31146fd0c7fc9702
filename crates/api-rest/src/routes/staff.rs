//! Staff directory and administrative staff management.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum::Router;
use uuid::Uuid;
use wardline_core::{StaffStats, StaffUpdate, StaffView};
use wardline_types::StaffRole;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff))
        .route("/stats", get(staff_stats))
        .route("/department/:dept", get(staff_by_department))
        .route("/available/:role", get(available_staff))
        .route("/:id", put(update_staff).delete(delete_staff))
}

#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "All non-admin staff", body = [StaffView]),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Lists all non-admin staff accounts.
pub async fn list_staff(State(state): State<AppState>, _user: AuthUser) -> Json<Vec<StaffView>> {
    let views = state.accounts.list().iter().map(StaffView::from).collect();
    Json(views)
}

#[utoipa::path(
    get,
    path = "/api/staff/department/{dept}",
    responses(
        (status = 200, description = "Approved staff in the department", body = [StaffView]),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Approved staff for one department (case-sensitive exact match).
pub async fn staff_by_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(dept): Path<String>,
) -> Json<Vec<StaffView>> {
    let views = state
        .accounts
        .by_department(&dept)
        .iter()
        .map(StaffView::from)
        .collect();
    Json(views)
}

#[utoipa::path(
    get,
    path = "/api/staff/available/{role}",
    responses(
        (status = 200, description = "Approved staff holding the role", body = [StaffView]),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Approved staff holding a given role (e.g. on-duty nurses).
pub async fn available_staff(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role): Path<StaffRole>,
) -> Json<Vec<StaffView>> {
    let views = state
        .accounts
        .available_by_role(role)
        .iter()
        .map(StaffView::from)
        .collect();
    Json(views)
}

#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    request_body = StaffUpdate,
    responses(
        (status = 200, description = "Updated staff record", body = StaffView),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown staff member", body = crate::error::ErrorBody)
    )
)]
/// Updates a staff record. Admin only.
pub async fn update_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<StaffUpdate>,
) -> Result<Json<StaffView>, ApiError> {
    user.require_admin()?;
    let staff = state.accounts.update(id, update)?;
    Ok(Json(StaffView::from(&staff)))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    responses(
        (status = 200, description = "Staff member deleted"),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown staff member", body = crate::error::ErrorBody)
    )
)]
/// Deletes a staff account. Admin only.
pub async fn delete_staff(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_admin()?;
    state.accounts.delete(id)?;
    Ok(Json(serde_json::json!({ "message": "Staff member deleted" })))
}

#[utoipa::path(
    get,
    path = "/api/staff/stats",
    responses(
        (status = 200, description = "Staff counts by role and department", body = StaffStats),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Aggregated staff counts.
pub async fn staff_stats(State(state): State<AppState>, _user: AuthUser) -> Json<StaffStats> {
    Json(state.accounts.stats())
}
