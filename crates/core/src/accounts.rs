//! Staff account store.
//!
//! Password hashing happens before the write lock is taken (bcrypt is
//! deliberately slow); only the duplicate-email check and the insert run
//! inside the critical section. Authentication failures are uniform so a
//! caller cannot distinguish an unknown email from a wrong password.

use crate::error::EntityKind;
use crate::registry::Registry;
use crate::stats::{DepartmentCount, StaffRoleCount, StaffStats};
use crate::{HospitalError, HospitalResult, NewStaff, StaffMember, StaffUpdate};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use wardline_types::StaffRole;

#[derive(Clone)]
pub struct AccountService {
    registry: Arc<Registry>,
}

impl AccountService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Registers a new staff account. The email must be unused.
    pub fn register(&self, new: NewStaff) -> HospitalResult<StaffMember> {
        if new.password.len() < 6 {
            return Err(HospitalError::Validation(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let staff = StaffMember::from_registration(new, Utc::now())?;

        self.registry.write_with(|state| {
            if state.staff.values().any(|s| s.email == staff.email) {
                return Err(HospitalError::Validation(format!(
                    "an account already exists for {}",
                    staff.email
                )));
            }

            state.staff.insert(staff.id, staff.clone());
            tracing::info!(staff = %staff.id, role = %staff.role, "staff account registered");
            Ok(staff)
        })
    }

    /// Verifies credentials and the approval gate.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`;
    /// unapproved non-admin accounts yield `PendingApproval`.
    pub fn authenticate(&self, email: &str, password: &str) -> HospitalResult<StaffMember> {
        let staff = {
            let state = self.registry.read();
            state
                .staff
                .values()
                .find(|s| s.email == email)
                .cloned()
                .ok_or(HospitalError::InvalidCredentials)?
        };

        if !staff.verify_password(password) {
            return Err(HospitalError::InvalidCredentials);
        }

        if !staff.is_approved && !staff.role.is_admin() {
            return Err(HospitalError::PendingApproval);
        }

        Ok(staff)
    }

    pub fn get(&self, staff_id: Uuid) -> HospitalResult<StaffMember> {
        self.registry
            .read()
            .staff
            .get(&staff_id)
            .cloned()
            .ok_or_else(|| HospitalError::not_found(EntityKind::Staff, staff_id))
    }

    /// All accounts still waiting for approval.
    pub fn pending(&self) -> Vec<StaffMember> {
        self.registry
            .read()
            .staff
            .values()
            .filter(|s| !s.is_approved)
            .cloned()
            .collect()
    }

    pub fn approve(&self, staff_id: Uuid) -> HospitalResult<StaffMember> {
        self.registry.write_with(|state| {
            let staff = state
                .staff
                .get_mut(&staff_id)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Staff, staff_id))?;
            staff.is_approved = true;
            Ok(staff.clone())
        })
    }

    /// All non-admin staff.
    pub fn list(&self) -> Vec<StaffMember> {
        self.registry
            .read()
            .staff
            .values()
            .filter(|s| !s.role.is_admin())
            .cloned()
            .collect()
    }

    /// Approved staff in a department (case-sensitive exact match, like the
    /// bed pool).
    pub fn by_department(&self, department: &str) -> Vec<StaffMember> {
        self.registry
            .read()
            .staff
            .values()
            .filter(|s| s.is_approved && s.department == department)
            .cloned()
            .collect()
    }

    /// Approved staff holding a given role.
    pub fn available_by_role(&self, role: StaffRole) -> Vec<StaffMember> {
        self.registry
            .read()
            .staff
            .values()
            .filter(|s| s.is_approved && s.role == role)
            .cloned()
            .collect()
    }

    pub fn update(&self, staff_id: Uuid, update: StaffUpdate) -> HospitalResult<StaffMember> {
        self.registry.write_with(|state| {
            let staff = state
                .staff
                .get_mut(&staff_id)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Staff, staff_id))?;

            if let Some(name) = update.name {
                staff.name = name;
            }
            if let Some(role) = update.role {
                staff.role = role;
            }
            if let Some(department) = update.department {
                staff.department = department;
            }
            if let Some(contact) = update.contact {
                staff.contact = Some(contact);
            }
            if let Some(specialization) = update.specialization {
                staff.specialization = Some(specialization);
            }
            if let Some(shift) = update.shift {
                staff.shift = shift;
            }

            Ok(staff.clone())
        })
    }

    /// Deletes a staff account. Errors with `NotFound` for an unknown id
    /// rather than silently succeeding.
    pub fn delete(&self, staff_id: Uuid) -> HospitalResult<()> {
        self.registry.write_with(|state| {
            state
                .staff
                .remove(&staff_id)
                .map(|_| ())
                .ok_or_else(|| HospitalError::not_found(EntityKind::Staff, staff_id))
        })
    }

    /// Staff counts grouped by role (with approved counts) and by
    /// department.
    pub fn stats(&self) -> StaffStats {
        let state = self.registry.read();

        let mut by_role: BTreeMap<StaffRole, StaffRoleCount> = BTreeMap::new();
        let mut by_department: BTreeMap<String, usize> = BTreeMap::new();

        for staff in state.staff.values() {
            let entry = by_role.entry(staff.role).or_insert(StaffRoleCount {
                role: staff.role,
                count: 0,
                available: 0,
            });
            entry.count += 1;
            if staff.is_approved {
                entry.available += 1;
            }

            *by_department.entry(staff.department.clone()).or_default() += 1;
        }

        StaffStats {
            by_role: by_role.into_values().collect(),
            by_department: by_department
                .into_iter()
                .map(|(department, count)| DepartmentCount { department, count })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardline_types::NonEmptyText;

    fn service() -> AccountService {
        AccountService::new(Arc::new(Registry::in_memory()))
    }

    fn registration(email: &str, role: StaffRole) -> NewStaff {
        NewStaff {
            name: NonEmptyText::new("Jamie Park").expect("name"),
            email: NonEmptyText::new(email).expect("email"),
            password: "hunter22".to_string(),
            role,
            department: Some("icu".to_string()),
            contact: None,
            specialization: None,
            shift: None,
        }
    }

    #[test]
    fn rejects_duplicate_email() {
        let accounts = service();
        accounts
            .register(registration("park@example.org", StaffRole::Nurse))
            .expect("first registration");
        let result = accounts.register(registration("park@example.org", StaffRole::Doctor));
        assert!(matches!(result, Err(HospitalError::Validation(_))));
    }

    #[test]
    fn rejects_short_password() {
        let accounts = service();
        let mut new = registration("short@example.org", StaffRole::Nurse);
        new.password = "abc".to_string();
        assert!(matches!(
            accounts.register(new),
            Err(HospitalError::Validation(_))
        ));
    }

    #[test]
    fn authentication_is_uniform_on_failure() {
        let accounts = service();
        accounts
            .register(registration("park@example.org", StaffRole::Nurse))
            .expect("registration");

        assert!(matches!(
            accounts.authenticate("nobody@example.org", "hunter22"),
            Err(HospitalError::InvalidCredentials)
        ));
        assert!(matches!(
            accounts.authenticate("park@example.org", "wrong"),
            Err(HospitalError::InvalidCredentials)
        ));
        let staff = accounts
            .authenticate("park@example.org", "hunter22")
            .expect("login");
        assert_eq!(staff.email, "park@example.org");
    }

    #[test]
    fn unapproved_non_admin_cannot_log_in() {
        let accounts = service();
        let staff = accounts
            .register(registration("park@example.org", StaffRole::Nurse))
            .expect("registration");

        // Simulate an admin revoking approval.
        accounts
            .registry
            .write_with(|state| {
                state
                    .staff
                    .get_mut(&staff.id)
                    .expect("staff present")
                    .is_approved = false;
                Ok(())
            })
            .expect("revoke");

        assert!(matches!(
            accounts.authenticate("park@example.org", "hunter22"),
            Err(HospitalError::PendingApproval)
        ));
        assert_eq!(accounts.pending().len(), 1);

        accounts.approve(staff.id).expect("approve");
        accounts
            .authenticate("park@example.org", "hunter22")
            .expect("login after approval");
    }

    #[test]
    fn list_excludes_admins() {
        let accounts = service();
        accounts
            .register(registration("admin@example.org", StaffRole::Admin))
            .expect("admin");
        accounts
            .register(registration("nurse@example.org", StaffRole::Nurse))
            .expect("nurse");

        let staff = accounts.list();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].role, StaffRole::Nurse);
    }

    #[test]
    fn stats_group_by_role_and_department() {
        let accounts = service();
        accounts
            .register(registration("a@example.org", StaffRole::Nurse))
            .expect("a");
        accounts
            .register(registration("b@example.org", StaffRole::Nurse))
            .expect("b");
        accounts
            .register(registration("c@example.org", StaffRole::Doctor))
            .expect("c");

        let stats = accounts.stats();
        let nurses = stats
            .by_role
            .iter()
            .find(|c| c.role == StaffRole::Nurse)
            .expect("nurse entry");
        assert_eq!(nurses.count, 2);
        assert_eq!(nurses.available, 2);
        assert_eq!(stats.by_department.len(), 1);
        assert_eq!(stats.by_department[0].department, "icu");
        assert_eq!(stats.by_department[0].count, 3);
    }
}
