//! Fixed shapes for the read-side aggregations.
//!
//! These are pure projections over current state; the services compute them
//! by grouping and counting, nothing more.

use serde::Serialize;
use utoipa::ToSchema;
use wardline_types::{BedType, EmergencyLevel, PatientStatus, StaffRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedTypeCount {
    pub bed_type: BedType,
    pub count: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedStats {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
    pub by_type: Vec<BedTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientStatusCount {
    pub status: PatientStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyLevelCount {
    pub level: EmergencyLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    pub total: usize,
    /// Patients whose status currently occupies a bed.
    pub admitted: usize,
    pub by_status: Vec<PatientStatusCount>,
    pub by_emergency_level: Vec<EmergencyLevelCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffRoleCount {
    pub role: StaffRole,
    pub count: usize,
    /// Approved accounts within the role, mirroring the "available" notion
    /// of the staff dashboard.
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffStats {
    pub by_role: Vec<StaffRoleCount>,
    pub by_department: Vec<DepartmentCount>,
}
