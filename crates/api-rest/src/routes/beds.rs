//! Bed listing, statistics and administrative updates.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::{get, put};
use axum::Router;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_core::{Bed, BedStats, BedUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_beds))
        .route("/stats", get(bed_stats))
        .route("/:id", put(update_bed))
}

/// Display-only expansion of the occupying patient.
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientRef {
    pub id: Uuid,
    pub name: String,
    pub age: u16,
    pub condition: String,
}

/// A bed with its patient reference expanded for display.
#[derive(Debug, Serialize, ToSchema)]
pub struct BedView {
    #[serde(flatten)]
    pub bed: Bed,
    pub patient: Option<PatientRef>,
}

#[utoipa::path(
    get,
    path = "/api/beds",
    responses(
        (status = 200, description = "All beds with expanded patient references", body = [BedView]),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Lists every bed; occupied beds carry the patient's name, age and
/// condition for the dashboard.
pub async fn list_beds(State(state): State<AppState>, _user: AuthUser) -> Json<Vec<BedView>> {
    let beds = state.pool.list();
    let views = beds
        .into_iter()
        .map(|bed| {
            let patient = bed
                .patient_id
                .and_then(|id| state.admissions.get(id).ok())
                .map(|p| PatientRef {
                    id: p.id,
                    name: p.name,
                    age: p.age,
                    condition: p.condition,
                });
            BedView { bed, patient }
        })
        .collect();
    Json(views)
}

#[utoipa::path(
    get,
    path = "/api/beds/stats",
    responses(
        (status = 200, description = "Bed counts by status and type", body = BedStats),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Aggregated bed counts.
pub async fn bed_stats(State(state): State<AppState>, _user: AuthUser) -> Json<BedStats> {
    Json(state.pool.stats())
}

#[utoipa::path(
    put,
    path = "/api/beds/{id}",
    request_body = BedUpdate,
    responses(
        (status = 200, description = "Updated bed", body = Bed),
        (status = 400, description = "Update would break the occupancy invariant", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown bed", body = crate::error::ErrorBody)
    )
)]
/// Administrative partial update (e.g. marking a bed for maintenance).
/// Admin only; occupancy cannot be edited through this endpoint.
pub async fn update_bed(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(update): Json<BedUpdate>,
) -> Result<Json<Bed>, ApiError> {
    user.require_admin()?;
    let bed = state.pool.update(&id, update)?;
    Ok(Json(bed))
}
