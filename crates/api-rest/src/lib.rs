//! # API REST
//!
//! REST API for the Wardline hospital administration system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Bearer-token authentication (JWT)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! All business logic lives in `wardline-core`; this crate only translates
//! between HTTP and the core services.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        routes::run_reconcile,
        routes::auth::register,
        routes::auth::login,
        routes::auth::me,
        routes::auth::pending,
        routes::auth::approve,
        routes::beds::list_beds,
        routes::beds::bed_stats,
        routes::beds::update_bed,
        routes::patients::list_patients,
        routes::patients::admit_patient,
        routes::patients::discharge_patient,
        routes::patients::remove_patient,
        routes::patients::update_clinical,
        routes::patients::patient_stats,
        routes::staff::list_staff,
        routes::staff::staff_by_department,
        routes::staff::available_staff,
        routes::staff::update_staff,
        routes::staff::delete_staff,
        routes::staff::staff_stats,
    ),
    components(schemas(
        routes::HealthRes,
        routes::auth::RegisterReq,
        routes::auth::LoginReq,
        routes::auth::AuthRes,
        routes::beds::BedView,
        routes::beds::PatientRef,
        routes::patients::PatientView,
        routes::patients::StaffRef,
        routes::patients::AdmitReq,
        routes::patients::MessageRes,
        crate::error::ErrorBody,
        wardline_core::Bed,
        wardline_core::BedUpdate,
        wardline_core::bed::Equipment,
        wardline_core::bed::OccupancyRecord,
        wardline_core::Patient,
        wardline_core::ClinicalUpdate,
        wardline_core::Insurance,
        wardline_core::Billing,
        wardline_core::StaffView,
        wardline_core::StaffUpdate,
        wardline_core::ConsistencyIssue,
        wardline_core::BedStats,
        wardline_core::stats::BedTypeCount,
        wardline_core::PatientStats,
        wardline_core::stats::PatientStatusCount,
        wardline_core::stats::EmergencyLevelCount,
        wardline_core::StaffStats,
        wardline_core::stats::StaffRoleCount,
        wardline_core::stats::DepartmentCount,
        wardline_types::BedType,
        wardline_types::BedStatus,
        wardline_types::PatientStatus,
        wardline_types::EmergencyLevel,
        wardline_types::Gender,
        wardline_types::StaffRole,
        wardline_types::Shift,
    ))
)]
pub struct ApiDoc;

/// Builds the application router: all API routes, Swagger UI and
/// permissive CORS for the browser dashboard.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/admin/reconcile", get(routes::run_reconcile))
        .nest("/api/auth", routes::auth::router())
        .nest("/api/beds", routes::beds::router())
        .nest("/api/patients", routes::patients::router())
        .nest("/api/staff", routes::staff::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
