//! Staff account records.
//!
//! Passwords are bcrypt-hashed before a record is ever constructed; the
//! plaintext never reaches the registry. `StaffView` is the sanitized shape
//! handed to the HTTP layer, it carries no hash.

use crate::{HospitalError, HospitalResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_types::{NonEmptyText, Shift, StaffRole};

/// A staff account as stored in the registry. Includes the password hash,
/// so this type must never be serialized into an API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: StaffRole,
    pub is_approved: bool,
    pub department: String,
    pub contact: Option<String>,
    pub specialization: Option<String>,
    pub shift: Shift,
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    /// Builds a stored record from a registration request, hashing the
    /// password with bcrypt.
    pub fn from_registration(new: NewStaff, now: DateTime<Utc>) -> HospitalResult<Self> {
        let password_hash =
            bcrypt::hash(&new.password, bcrypt::DEFAULT_COST).map_err(HospitalError::PasswordHash)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: new.name.into_string(),
            email: new.email.into_string(),
            password_hash,
            role: new.role,
            // Accounts are auto-approved; admins can still revoke and
            // re-approve through the approval endpoints.
            is_approved: true,
            department: new
                .department
                .unwrap_or_else(|| crate::patient::DEFAULT_DEPARTMENT.to_string()),
            contact: new.contact,
            specialization: new.specialization,
            shift: new.shift.unwrap_or_default(),
            created_at: now,
        })
    }

    /// Verifies a plaintext password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Registration input. The password is plaintext here and is hashed before
/// storage.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: NonEmptyText,
    pub email: NonEmptyText,
    pub password: String,
    pub role: StaffRole,
    pub department: Option<String>,
    pub contact: Option<String>,
    pub specialization: Option<String>,
    pub shift: Option<Shift>,
}

/// Administrative partial update for a staff record. Credentials and role
/// approval are managed through their own operations.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub department: Option<String>,
    pub contact: Option<String>,
    pub specialization: Option<String>,
    pub shift: Option<Shift>,
}

/// Sanitized staff record for API responses: everything except the
/// password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub is_approved: bool,
    pub department: String,
    pub contact: Option<String>,
    pub specialization: Option<String>,
    pub shift: Shift,
    pub created_at: DateTime<Utc>,
}

impl From<&StaffMember> for StaffView {
    fn from(staff: &StaffMember) -> Self {
        Self {
            id: staff.id,
            name: staff.name.clone(),
            email: staff.email.clone(),
            role: staff.role,
            is_approved: staff.is_approved,
            department: staff.department.clone(),
            contact: staff.contact.clone(),
            specialization: staff.specialization.clone(),
            shift: staff.shift,
            created_at: staff.created_at,
        }
    }
}
