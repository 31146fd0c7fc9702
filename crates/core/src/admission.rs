//! Admission workflow: pairing patients with beds and undoing the pairing.
//!
//! `admit` performs its entire reserve-and-create sequence inside one
//! registry write-lock section. Two concurrent admissions therefore can
//! never claim the same bed, and no caller can ever observe a patient
//! record pointing at a bed that was not flipped to occupied.

use crate::error::EntityKind;
use crate::registry::Registry;
use crate::stats::{EmergencyLevelCount, PatientStats, PatientStatusCount};
use crate::{pool, AdmissionDraft, ClinicalUpdate, HospitalError, HospitalResult, Patient};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use wardline_types::{EmergencyLevel, PatientStatus};

/// Oldest plausible patient; ages above this are treated as input errors.
const MAX_AGE: u16 = 130;

#[derive(Clone)]
pub struct AdmissionService {
    registry: Arc<Registry>,
}

impl AdmissionService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// All patients, in insertion-id order.
    pub fn list(&self) -> Vec<Patient> {
        self.registry.read().patients.values().cloned().collect()
    }

    pub fn get(&self, patient_id: Uuid) -> HospitalResult<Patient> {
        self.registry
            .read()
            .patients
            .get(&patient_id)
            .cloned()
            .ok_or_else(|| HospitalError::not_found(EntityKind::Patient, patient_id))
    }

    /// Admits a new patient into one available bed of the requested
    /// department (defaults to `"general"`).
    ///
    /// Fails with `NoBedAvailable` before any record is created when the
    /// department has no eligible bed. On success the new patient is
    /// `Admitted`, carries the bed reference and the bed's room number, and
    /// the bed is `Occupied` pointing back at the patient.
    pub fn admit(&self, draft: AdmissionDraft) -> HospitalResult<Patient> {
        if draft.age > MAX_AGE {
            return Err(HospitalError::Validation(format!(
                "age must be at most {MAX_AGE}"
            )));
        }

        let department = draft.department().to_string();

        self.registry.write_with(|state| {
            let bed_number = state
                .beds
                .values()
                .find(|bed| bed.is_available() && bed.department == department)
                .map(|bed| bed.bed_number.clone())
                .ok_or_else(|| HospitalError::NoBedAvailable {
                    department: department.clone(),
                })?;

            let now = Utc::now();
            let patient_id = Uuid::new_v4();

            // The find above guarantees the entry exists and we still hold
            // the write lock, so this lookup cannot miss.
            let bed = state
                .beds
                .get_mut(&bed_number)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Bed, &bed_number))?;

            let patient = Patient {
                id: patient_id,
                name: draft.name.into_string(),
                age: draft.age,
                gender: draft.gender,
                contact: draft.contact.into_string(),
                emergency_contact: draft.emergency_contact,
                address: draft.address,
                blood_group: draft.blood_group,
                room_number: bed.room_number.clone(),
                bed_id: Some(bed.bed_number.clone()),
                emergency_level: draft.emergency_level.unwrap_or(EmergencyLevel::Low),
                condition: draft.condition.into_string(),
                symptoms: draft.symptoms,
                assigned_doctor: draft.assigned_doctor,
                assigned_nurse: draft.assigned_nurse,
                admission_date: now,
                discharge_date: None,
                status: PatientStatus::Admitted,
                insurance: draft.insurance,
                billing: None,
                notes: draft.notes,
            };

            pool::occupy(bed, patient_id, now);
            state.patients.insert(patient_id, patient.clone());

            tracing::info!(
                patient = %patient_id,
                bed = %bed_number,
                department = %department,
                "patient admitted"
            );

            Ok(patient)
        })
    }

    /// Ends a patient's occupancy: status `Discharged`, discharge timestamp
    /// set, bed freed if the patient still holds the live reference.
    ///
    /// Discharging twice is a tolerated no-op for the bed: the second call
    /// only refreshes the patient's status and timestamp.
    pub fn discharge(&self, patient_id: Uuid) -> HospitalResult<Patient> {
        self.registry.write_with(|state| {
            let patient = state
                .patients
                .get_mut(&patient_id)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Patient, patient_id))?;

            let now = Utc::now();
            patient.status = PatientStatus::Discharged;
            patient.discharge_date = Some(now);

            // bed_id is retained for historical lookup; only free the bed
            // if it still points back at this patient.
            let bed_id = patient.bed_id.clone();
            let patient = patient.clone();
            if let Some(bed_id) = bed_id {
                if let Some(bed) = state.beds.get_mut(&bed_id) {
                    if bed.patient_id == Some(patient_id) {
                        pool::release(bed, now);
                        tracing::info!(patient = %patient_id, bed = %bed_id, "bed freed on discharge");
                    }
                }
            }

            Ok(patient)
        })
    }

    /// Deletes a patient record entirely, freeing its bed first.
    /// Unlike discharge no history is retained on the patient side; the
    /// bed's occupancy history keeps the closed record.
    pub fn remove(&self, patient_id: Uuid) -> HospitalResult<()> {
        self.registry.write_with(|state| {
            let patient = state
                .patients
                .get(&patient_id)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Patient, patient_id))?;

            let bed_id = patient.bed_id.clone();
            if let Some(bed_id) = bed_id {
                if let Some(bed) = state.beds.get_mut(&bed_id) {
                    if bed.patient_id == Some(patient_id) {
                        pool::release(bed, Utc::now());
                    }
                }
            }

            state.patients.remove(&patient_id);
            tracing::info!(patient = %patient_id, "patient record deleted");
            Ok(())
        })
    }

    /// Applies a clinical update. The bed reference, room number and
    /// admission/discharge timestamps are not reachable from here.
    pub fn update_clinical(
        &self,
        patient_id: Uuid,
        update: ClinicalUpdate,
    ) -> HospitalResult<Patient> {
        if let Some(status) = update.status {
            if !status.is_active() {
                return Err(HospitalError::Validation(format!(
                    "clinical updates may only move a patient between admitted and in-treatment, not to {status}"
                )));
            }
        }

        self.registry.write_with(|state| {
            let patient = state
                .patients
                .get_mut(&patient_id)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Patient, patient_id))?;

            if let Some(status) = update.status {
                if !patient.status.is_active() {
                    return Err(HospitalError::Validation(format!(
                        "patient is {}; only admitted or in-treatment patients can be updated to {status}",
                        patient.status
                    )));
                }
                patient.status = status;
            }
            if let Some(condition) = update.condition {
                patient.condition = condition;
            }
            if let Some(symptoms) = update.symptoms {
                patient.symptoms = symptoms;
            }
            if let Some(level) = update.emergency_level {
                patient.emergency_level = level;
            }
            if let Some(doctor) = update.assigned_doctor {
                patient.assigned_doctor = Some(doctor);
            }
            if let Some(nurse) = update.assigned_nurse {
                patient.assigned_nurse = Some(nurse);
            }
            if let Some(insurance) = update.insurance {
                patient.insurance = Some(insurance);
            }
            if let Some(billing) = update.billing {
                patient.billing = Some(billing);
            }
            if let Some(notes) = update.notes {
                patient.notes = Some(notes);
            }

            Ok(patient.clone())
        })
    }

    /// Patient counts grouped by status and by emergency level.
    pub fn stats(&self) -> PatientStats {
        let state = self.registry.read();

        let mut by_status: BTreeMap<PatientStatus, usize> = BTreeMap::new();
        let mut by_level: BTreeMap<EmergencyLevel, usize> = BTreeMap::new();
        let mut admitted = 0usize;

        for patient in state.patients.values() {
            *by_status.entry(patient.status).or_default() += 1;
            *by_level.entry(patient.emergency_level).or_default() += 1;
            if patient.status.is_active() {
                admitted += 1;
            }
        }

        PatientStats {
            total: state.patients.len(),
            admitted,
            by_status: by_status
                .into_iter()
                .map(|(status, count)| PatientStatusCount { status, count })
                .collect(),
            by_emergency_level: by_level
                .into_iter()
                .map(|(level, count)| EmergencyLevelCount { level, count })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bed, BedPool};
    use wardline_types::{BedStatus, BedType, Gender, NonEmptyText};

    fn service_with_beds(beds: Vec<Bed>) -> (AdmissionService, BedPool, Arc<Registry>) {
        let registry = Arc::new(Registry::in_memory());
        let pool = BedPool::new(registry.clone());
        for bed in beds {
            pool.insert(bed).expect("insert bed");
        }
        (AdmissionService::new(registry.clone()), pool, registry)
    }

    fn draft(name: &str, condition: &str, department: Option<&str>) -> AdmissionDraft {
        let mut draft = AdmissionDraft::new(
            NonEmptyText::new(name).expect("name"),
            34,
            Gender::Female,
            NonEmptyText::new("555-0100").expect("contact"),
            NonEmptyText::new(condition).expect("condition"),
        );
        draft.department = department.map(str::to_string);
        draft
    }

    #[test]
    fn admits_into_available_bed() {
        // Scenario: one available general bed B001 in room R100.
        let (service, pool, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");

        assert_eq!(alice.bed_id.as_deref(), Some("B001"));
        assert_eq!(alice.room_number, "R100");
        assert_eq!(alice.status, PatientStatus::Admitted);

        let bed = pool.get("B001").expect("bed");
        assert_eq!(bed.status, BedStatus::Occupied);
        assert_eq!(bed.patient_id, Some(alice.id));
    }

    #[test]
    fn admission_defaults_to_general_department() {
        let (service, _, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let patient = service
            .admit(draft("Bob", "Fracture", None))
            .expect("admission");
        assert_eq!(patient.bed_id.as_deref(), Some("B001"));
    }

    #[test]
    fn admission_fails_without_bed_and_creates_no_record() {
        // Scenario: zero available icu beds.
        let (service, _, registry) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let result = service.admit(draft("Carol", "Sepsis", Some("icu")));
        assert!(matches!(
            result,
            Err(HospitalError::NoBedAvailable { ref department }) if department == "icu"
        ));
        assert!(registry.read().patients.is_empty());
    }

    #[test]
    fn admission_rejects_implausible_age() {
        let (service, _, registry) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let mut bad = draft("Dora", "Flu", Some("general"));
        bad.age = 200;
        assert!(matches!(
            service.admit(bad),
            Err(HospitalError::Validation(_))
        ));
        assert!(registry.read().patients.is_empty());
    }

    #[test]
    fn discharge_round_trip_frees_the_bed() {
        let (service, pool, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");
        let discharged = service.discharge(alice.id).expect("discharge");

        assert_eq!(discharged.status, PatientStatus::Discharged);
        let discharge_date = discharged.discharge_date.expect("discharge date");
        assert!(discharge_date >= discharged.admission_date);
        // The reference is retained for historical lookup but is no longer live.
        assert_eq!(discharged.bed_id.as_deref(), Some("B001"));
        assert_eq!(discharged.active_bed(), None);

        let bed = pool.get("B001").expect("bed");
        assert_eq!(bed.status, BedStatus::Available);
        assert_eq!(bed.patient_id, None);
    }

    #[test]
    fn double_discharge_is_a_tolerated_noop() {
        let (service, pool, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");
        service.discharge(alice.id).expect("first discharge");

        // Someone else takes the bed in between.
        let bob = service
            .admit(draft("Bob", "Fracture", Some("general")))
            .expect("second admission");

        let again = service.discharge(alice.id).expect("second discharge");
        assert_eq!(again.status, PatientStatus::Discharged);

        // Bob's occupancy is untouched.
        let bed = pool.get("B001").expect("bed");
        assert_eq!(bed.status, BedStatus::Occupied);
        assert_eq!(bed.patient_id, Some(bob.id));
    }

    #[test]
    fn removal_frees_the_bed_and_deletes_the_record() {
        let (service, pool, registry) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");
        service.remove(alice.id).expect("removal");

        assert!(registry.read().patients.is_empty());
        let bed = pool.get("B001").expect("bed");
        assert_eq!(bed.status, BedStatus::Available);
        assert_eq!(bed.patient_id, None);
        assert!(matches!(
            service.remove(alice.id),
            Err(HospitalError::NotFound { .. })
        ));
    }

    #[test]
    fn concurrent_admissions_cannot_double_book() {
        // Scenario: two simultaneous admissions, one eligible bed.
        let (service, pool, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let handles: Vec<_> = ["First", "Second"]
            .into_iter()
            .map(|name| {
                let service = service.clone();
                let draft = draft(name, "Asthma", Some("general"));
                std::thread::spawn(move || service.admit(draft))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect();

        let admitted: Vec<_> = outcomes.iter().filter(|r| r.is_ok()).collect();
        let rejected: Vec<_> = outcomes
            .iter()
            .filter(|r| matches!(r, Err(HospitalError::NoBedAvailable { .. })))
            .collect();
        assert_eq!(admitted.len(), 1);
        assert_eq!(rejected.len(), 1);

        let winner = admitted[0].as_ref().expect("winner");
        let bed = pool.get("B001").expect("bed");
        assert_eq!(bed.patient_id, Some(winner.id));
    }

    #[test]
    fn clinical_update_cannot_move_patient_between_beds_or_discharge() {
        let (service, _, _) = service_with_beds(vec![Bed::new(
            "B001",
            "R100",
            BedType::General,
            "general",
        )]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");

        let updated = service
            .update_clinical(
                alice.id,
                ClinicalUpdate {
                    condition: Some("Severe asthma".to_string()),
                    status: Some(PatientStatus::InTreatment),
                    ..ClinicalUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(updated.condition, "Severe asthma");
        assert_eq!(updated.status, PatientStatus::InTreatment);
        assert_eq!(updated.bed_id.as_deref(), Some("B001"));

        let result = service.update_clinical(
            alice.id,
            ClinicalUpdate {
                status: Some(PatientStatus::Discharged),
                ..ClinicalUpdate::default()
            },
        );
        assert!(matches!(result, Err(HospitalError::Validation(_))));
    }

    #[test]
    fn stats_groups_by_status_and_emergency_level() {
        let (service, _, _) = service_with_beds(vec![
            Bed::new("B001", "R100", BedType::General, "general"),
            Bed::new("B002", "R101", BedType::General, "general"),
        ]);

        let alice = service
            .admit(draft("Alice", "Asthma", Some("general")))
            .expect("admission");
        service
            .admit(draft("Bob", "Fracture", Some("general")))
            .expect("admission");
        service.discharge(alice.id).expect("discharge");

        let stats = service.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.admitted, 1);
        assert_eq!(
            stats
                .by_status
                .iter()
                .find(|c| c.status == PatientStatus::Discharged)
                .map(|c| c.count),
            Some(1)
        );
        assert_eq!(
            stats
                .by_emergency_level
                .iter()
                .find(|c| c.level == EmergencyLevel::Low)
                .map(|c| c.count),
            Some(2)
        );
    }
}
