//! Admission, discharge, removal and clinical updates.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_core::{
    AdmissionDraft, ClinicalUpdate, HospitalError, Insurance, Patient, PatientStats,
};
use wardline_types::{EmergencyLevel, Gender, NonEmptyText, StaffRole};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_patients).post(admit_patient))
        .route("/stats", get(patient_stats))
        .route("/:id", delete(remove_patient))
        .route("/:id/discharge", post(discharge_patient))
        .route("/:id/clinical", put(update_clinical))
}

/// Display-only expansion of an assigned staff member.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffRef {
    pub id: Uuid,
    pub name: String,
    pub role: StaffRole,
}

/// A patient with assigned doctor/nurse expanded for display.
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientView {
    #[serde(flatten)]
    pub patient: Patient,
    pub doctor: Option<StaffRef>,
    pub nurse: Option<StaffRef>,
}

/// Admission request. Identity, bed, status and timestamps are assigned by
/// the workflow.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdmitReq {
    pub name: String,
    pub age: u16,
    pub gender: Gender,
    pub contact: String,
    pub condition: String,
    pub department: Option<String>,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_level: Option<EmergencyLevel>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub assigned_doctor: Option<Uuid>,
    pub assigned_nurse: Option<Uuid>,
    pub insurance: Option<Insurance>,
    pub notes: Option<String>,
}

impl TryFrom<AdmitReq> for AdmissionDraft {
    type Error = HospitalError;

    fn try_from(req: AdmitReq) -> Result<Self, Self::Error> {
        let mut draft = AdmissionDraft::new(
            NonEmptyText::new(&req.name)
                .map_err(|_| HospitalError::Validation("name is required".to_string()))?,
            req.age,
            req.gender,
            NonEmptyText::new(&req.contact)
                .map_err(|_| HospitalError::Validation("contact is required".to_string()))?,
            NonEmptyText::new(&req.condition)
                .map_err(|_| HospitalError::Validation("condition is required".to_string()))?,
        );
        draft.department = req.department;
        draft.emergency_contact = req.emergency_contact;
        draft.address = req.address;
        draft.blood_group = req.blood_group;
        draft.emergency_level = req.emergency_level;
        draft.symptoms = req.symptoms;
        draft.assigned_doctor = req.assigned_doctor;
        draft.assigned_nurse = req.assigned_nurse;
        draft.insurance = req.insurance;
        draft.notes = req.notes;
        Ok(draft)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "All patients with expanded staff references", body = [PatientView]),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Lists every patient; assigned doctor and nurse are expanded to name and
/// role for the dashboard.
pub async fn list_patients(State(state): State<AppState>, _user: AuthUser) -> Json<Vec<PatientView>> {
    let expand = |id: Option<Uuid>| {
        id.and_then(|id| state.accounts.get(id).ok()).map(|s| StaffRef {
            id: s.id,
            name: s.name,
            role: s.role,
        })
    };

    let views = state
        .admissions
        .list()
        .into_iter()
        .map(|patient| PatientView {
            doctor: expand(patient.assigned_doctor),
            nurse: expand(patient.assigned_nurse),
            patient,
        })
        .collect();
    Json(views)
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = AdmitReq,
    responses(
        (status = 201, description = "Patient admitted", body = Patient),
        (status = 400, description = "No bed available or invalid input", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Admits a new patient into an available bed of the requested department.
///
/// The bed claim and the patient creation happen atomically; when no bed is
/// available no patient record is created.
pub async fn admit_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<AdmitReq>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let draft = AdmissionDraft::try_from(req)?;
    let patient = state.admissions.admit(draft)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/discharge",
    responses(
        (status = 200, description = "Patient discharged, bed freed", body = Patient),
        (status = 404, description = "Unknown patient", body = crate::error::ErrorBody)
    )
)]
/// Discharges a patient and returns their bed to the pool.
pub async fn discharge_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.admissions.discharge(id)?;
    Ok(Json(patient))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    responses(
        (status = 200, description = "Patient deleted, bed freed", body = MessageRes),
        (status = 404, description = "Unknown patient", body = crate::error::ErrorBody)
    )
)]
/// Deletes a patient record entirely, freeing its bed first.
pub async fn remove_patient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageRes>, ApiError> {
    state.admissions.remove(id)?;
    Ok(Json(MessageRes {
        message: "Patient deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}/clinical",
    request_body = ClinicalUpdate,
    responses(
        (status = 200, description = "Updated patient", body = Patient),
        (status = 400, description = "Update would bypass the admission workflow", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown patient", body = crate::error::ErrorBody)
    )
)]
/// Applies a clinical update. Bed references and admission state cannot be
/// edited here; use the admission and discharge endpoints for those.
pub async fn update_clinical(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<ClinicalUpdate>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.admissions.update_clinical(id, update)?;
    Ok(Json(patient))
}

#[utoipa::path(
    get,
    path = "/api/patients/stats",
    responses(
        (status = 200, description = "Patient counts by status and emergency level", body = PatientStats),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody)
    )
)]
/// Aggregated patient counts.
pub async fn patient_stats(State(state): State<AppState>, _user: AuthUser) -> Json<PatientStats> {
    Json(state.admissions.stats())
}
