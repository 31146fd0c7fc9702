//! Bed/patient cross-reference reconciliation.
//!
//! With every workflow mutation running inside one write-lock section these
//! checks should never fire, but the failure mode must stay detectable:
//! snapshots can be edited by hand and older deployments did not close the
//! reserve/create race. The check is read-only and cheap enough to run on
//! demand or on a timer.

use crate::registry::Registry;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// One detected inconsistency between a bed and a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyIssue {
    pub bed_number: Option<String>,
    pub patient_id: Option<Uuid>,
    pub detail: String,
}

/// Scans every bed and patient for violations of the occupancy invariants:
/// occupied beds must reference an active patient that points back, and
/// active patients must hold a live, symmetric bed reference.
pub fn reconcile(registry: &Registry) -> Vec<ConsistencyIssue> {
    let state = registry.read();
    let mut issues = Vec::new();

    for bed in state.beds.values() {
        let occupied = bed.status == wardline_types::BedStatus::Occupied;
        match (&bed.patient_id, occupied) {
            (Some(_), true) | (None, false) => {}
            (Some(_), false) => issues.push(ConsistencyIssue {
                bed_number: Some(bed.bed_number.clone()),
                patient_id: bed.patient_id,
                detail: format!(
                    "bed {} references a patient but its status is {}",
                    bed.bed_number, bed.status
                ),
            }),
            (None, true) => issues.push(ConsistencyIssue {
                bed_number: Some(bed.bed_number.clone()),
                patient_id: None,
                detail: format!("bed {} is occupied with no patient reference", bed.bed_number),
            }),
        }

        if let Some(patient_id) = bed.patient_id {
            match state.patients.get(&patient_id) {
                None => issues.push(ConsistencyIssue {
                    bed_number: Some(bed.bed_number.clone()),
                    patient_id: Some(patient_id),
                    detail: format!(
                        "bed {} references a patient record that does not exist",
                        bed.bed_number
                    ),
                }),
                Some(patient) => {
                    if patient.active_bed() != Some(bed.bed_number.as_str()) {
                        issues.push(ConsistencyIssue {
                            bed_number: Some(bed.bed_number.clone()),
                            patient_id: Some(patient_id),
                            detail: format!(
                                "bed {} references patient {} but the patient does not hold a live reference back",
                                bed.bed_number, patient_id
                            ),
                        });
                    }
                }
            }
        }
    }

    for patient in state.patients.values() {
        if !patient.status.is_active() {
            continue;
        }
        match patient.bed_id.as_deref() {
            None => issues.push(ConsistencyIssue {
                bed_number: None,
                patient_id: Some(patient.id),
                detail: format!("patient {} is {} but holds no bed", patient.id, patient.status),
            }),
            Some(bed_id) => match state.beds.get(bed_id) {
                None => issues.push(ConsistencyIssue {
                    bed_number: Some(bed_id.to_string()),
                    patient_id: Some(patient.id),
                    detail: format!("patient {} references unknown bed {bed_id}", patient.id),
                }),
                Some(bed) => {
                    if bed.patient_id != Some(patient.id) {
                        issues.push(ConsistencyIssue {
                            bed_number: Some(bed_id.to_string()),
                            patient_id: Some(patient.id),
                            detail: format!(
                                "patient {} claims bed {bed_id} but the bed does not point back",
                                patient.id
                            ),
                        });
                    }
                }
            },
        }
    }

    issues
}
