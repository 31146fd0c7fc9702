//! Shared domain types for the Wardline hospital administration system.
//!
//! This crate holds the vocabulary types used across the core services and
//! the REST API: validated text, bed and patient classifications, and staff
//! roles. It deliberately has no knowledge of storage or HTTP concerns.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Classification of a bed within the facility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum BedType {
    General,
    Icu,
    Emergency,
    Isolation,
    StepDown,
    Pediatric,
    Maternity,
}

impl std::fmt::Display for BedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BedType::General => "general",
            BedType::Icu => "icu",
            BedType::Emergency => "emergency",
            BedType::Isolation => "isolation",
            BedType::StepDown => "step-down",
            BedType::Pediatric => "pediatric",
            BedType::Maternity => "maternity",
        };
        write!(f, "{s}")
    }
}

/// Occupancy status of a bed.
///
/// `Occupied` is only ever established by the admission workflow; the other
/// statuses may be set administratively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl std::fmt::Display for BedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Maintenance => "maintenance",
            BedStatus::Reserved => "reserved",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of a patient record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Admitted,
    Discharged,
    Transferred,
    InTreatment,
}

impl PatientStatus {
    /// Whether a patient in this status currently occupies a bed.
    pub fn is_active(self) -> bool {
        matches!(self, PatientStatus::Admitted | PatientStatus::InTreatment)
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PatientStatus::Admitted => "admitted",
            PatientStatus::Discharged => "discharged",
            PatientStatus::Transferred => "transferred",
            PatientStatus::InTreatment => "in-treatment",
        };
        write!(f, "{s}")
    }
}

/// Triage severity classification. Used for reporting only; it does not
/// influence bed selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EmergencyLevel::Low => "low",
            EmergencyLevel::Medium => "medium",
            EmergencyLevel::High => "high",
            EmergencyLevel::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Staff account role. `Admin` gates administrative operations; every other
/// role is treated uniformly by the core.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Doctor,
    Nurse,
    Technician,
    Pharmacist,
    Janitor,
    Receptionist,
}

impl StaffRole {
    pub fn is_admin(self) -> bool {
        matches!(self, StaffRole::Admin)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StaffRole::Admin => "admin",
            StaffRole::Doctor => "doctor",
            StaffRole::Nurse => "nurse",
            StaffRole::Technician => "technician",
            StaffRole::Pharmacist => "pharmacist",
            StaffRole::Janitor => "janitor",
            StaffRole::Receptionist => "receptionist",
        };
        write!(f, "{s}")
    }
}

/// Working shift of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Evening,
    Night,
    General,
}

impl Default for Shift {
    fn default() -> Self {
        Shift::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Alice  ").expect("valid text");
        assert_eq!(text.as_str(), "Alice");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert!(NonEmptyText::new("   ").is_err());
        assert!(NonEmptyText::new("").is_err());
    }

    #[test]
    fn bed_type_serializes_kebab_case() {
        let json = serde_json::to_string(&BedType::StepDown).expect("serialize");
        assert_eq!(json, "\"step-down\"");
        let back: BedType = serde_json::from_str("\"step-down\"").expect("deserialize");
        assert_eq!(back, BedType::StepDown);
    }

    #[test]
    fn patient_status_active_only_when_occupying_a_bed() {
        assert!(PatientStatus::Admitted.is_active());
        assert!(PatientStatus::InTreatment.is_active());
        assert!(!PatientStatus::Discharged.is_active());
        assert!(!PatientStatus::Transferred.is_active());
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(PatientStatus::InTreatment.to_string(), "in-treatment");
        assert_eq!(BedStatus::Maintenance.to_string(), "maintenance");
        assert_eq!(StaffRole::Receptionist.to_string(), "receptionist");
    }
}
