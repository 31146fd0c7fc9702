//! Patient records and the inputs to the admission workflow.
//!
//! A patient's `bed_id` is retained after discharge for historical lookup;
//! it only counts as a live reference while the patient's status is active
//! (`Admitted` or `InTreatment`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_types::{EmergencyLevel, Gender, NonEmptyText, PatientStatus};

/// Department used when an admission request does not name one.
pub const DEFAULT_DEPARTMENT: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub provider: String,
    pub policy_number: String,
    pub coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub total_amount: f64,
    pub paid_amount: f64,
    pub pending_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u16,
    pub gender: Gender,
    pub contact: String,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    /// Denormalized copy of the assigned bed's room number.
    pub room_number: String,
    /// Reference to the assigned bed. Retained after discharge; live only
    /// while `status.is_active()`.
    pub bed_id: Option<String>,
    pub emergency_level: EmergencyLevel,
    pub condition: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub assigned_doctor: Option<Uuid>,
    pub assigned_nurse: Option<Uuid>,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: Option<DateTime<Utc>>,
    pub status: PatientStatus,
    pub insurance: Option<Insurance>,
    pub billing: Option<Billing>,
    pub notes: Option<String>,
}

impl Patient {
    /// The bed reference, if it is currently live.
    pub fn active_bed(&self) -> Option<&str> {
        if self.status.is_active() {
            self.bed_id.as_deref()
        } else {
            None
        }
    }
}

/// Input to the admission workflow. Identity, bed reference, status and
/// admission timestamp are assigned by the workflow itself.
#[derive(Debug, Clone)]
pub struct AdmissionDraft {
    pub name: NonEmptyText,
    pub age: u16,
    pub gender: Gender,
    pub contact: NonEmptyText,
    pub condition: NonEmptyText,
    pub department: Option<String>,
    pub emergency_contact: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_level: Option<EmergencyLevel>,
    pub symptoms: Vec<String>,
    pub assigned_doctor: Option<Uuid>,
    pub assigned_nurse: Option<Uuid>,
    pub insurance: Option<Insurance>,
    pub notes: Option<String>,
}

impl AdmissionDraft {
    /// Minimal draft with only the required fields set.
    pub fn new(
        name: NonEmptyText,
        age: u16,
        gender: Gender,
        contact: NonEmptyText,
        condition: NonEmptyText,
    ) -> Self {
        Self {
            name,
            age,
            gender,
            contact,
            condition,
            department: None,
            emergency_contact: None,
            address: None,
            blood_group: None,
            emergency_level: None,
            symptoms: Vec::new(),
            assigned_doctor: None,
            assigned_nurse: None,
            insurance: None,
            notes: None,
        }
    }

    /// The department this admission targets.
    pub fn department(&self) -> &str {
        self.department.as_deref().unwrap_or(DEFAULT_DEPARTMENT)
    }
}

/// Intention-revealing clinical update.
///
/// Replaces a generic patch endpoint: the bed reference, room number and
/// admission/discharge timestamps are not reachable from here, so the
/// bed/patient symmetry invariant cannot be bypassed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalUpdate {
    pub condition: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub emergency_level: Option<EmergencyLevel>,
    /// Only `admitted` <-> `in-treatment` moves are allowed; admission and
    /// discharge own the other transitions.
    pub status: Option<PatientStatus>,
    pub assigned_doctor: Option<Uuid>,
    pub assigned_nurse: Option<Uuid>,
    pub insurance: Option<Insurance>,
    pub billing: Option<Billing>,
    pub notes: Option<String>,
}
