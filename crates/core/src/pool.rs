//! Bed pool: the sole mutation path for bed status changes.
//!
//! Department matching in `find_available` is a case-sensitive exact match.
//! Tie-break among several eligible beds is iteration order over the
//! registry, which is stable (bed-number order) but not contractual.

use crate::error::EntityKind;
use crate::registry::Registry;
use crate::stats::{BedStats, BedTypeCount};
use crate::{Bed, BedUpdate, HospitalError, HospitalResult, OccupancyRecord};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use wardline_types::BedStatus;

#[derive(Clone)]
pub struct BedPool {
    registry: Arc<Registry>,
}

impl BedPool {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// All beds, in bed-number order.
    pub fn list(&self) -> Vec<Bed> {
        self.registry.read().beds.values().cloned().collect()
    }

    pub fn get(&self, bed_number: &str) -> HospitalResult<Bed> {
        self.registry
            .read()
            .beds
            .get(bed_number)
            .cloned()
            .ok_or_else(|| HospitalError::not_found(EntityKind::Bed, bed_number))
    }

    /// Adds a bed to the pool. Fails if the bed number is already taken.
    pub fn insert(&self, bed: Bed) -> HospitalResult<()> {
        self.registry.write_with(|state| {
            if state.beds.contains_key(&bed.bed_number) {
                return Err(HospitalError::Validation(format!(
                    "bed number already exists: {}",
                    bed.bed_number
                )));
            }
            state.beds.insert(bed.bed_number.clone(), bed);
            Ok(())
        })
    }

    /// Returns one available bed in the given department, or
    /// `NoBedAvailable`. A bed in any status other than `Available` is
    /// never returned.
    ///
    /// Callers that go on to occupy the bed must not rely on this read
    /// staying true; the admission workflow instead claims its bed inside
    /// a single write-lock section.
    pub fn find_available(&self, department: &str) -> HospitalResult<Bed> {
        self.registry
            .read()
            .beds
            .values()
            .find(|bed| bed.is_available() && bed.department == department)
            .cloned()
            .ok_or_else(|| HospitalError::NoBedAvailable {
                department: department.to_string(),
            })
    }

    /// Marks a bed occupied by the given patient and opens an
    /// occupancy-history record.
    pub fn mark_occupied(
        &self,
        bed_number: &str,
        patient_id: Uuid,
        admitted_at: DateTime<Utc>,
    ) -> HospitalResult<Bed> {
        self.registry.write_with(|state| {
            let bed = state
                .beds
                .get_mut(bed_number)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Bed, bed_number))?;
            occupy(bed, patient_id, admitted_at);
            Ok(bed.clone())
        })
    }

    /// Returns a bed to the pool: status back to `Available`, patient
    /// reference cleared, open occupancy-history record closed. Idempotent
    /// on a bed that is already available.
    pub fn mark_available(&self, bed_number: &str) -> HospitalResult<Bed> {
        self.registry.write_with(|state| {
            let bed = state
                .beds
                .get_mut(bed_number)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Bed, bed_number))?;
            release(bed, Utc::now());
            Ok(bed.clone())
        })
    }

    /// Administrative partial update.
    ///
    /// Status rules: `Occupied` is never accepted here, even on a bed that
    /// is already occupied (only admission establishes occupancy), and a
    /// bed holding a patient reference cannot be moved off `Occupied`
    /// without discharging the patient first, so a completed update never
    /// leaves the bed/patient symmetry broken.
    pub fn update(&self, bed_number: &str, update: BedUpdate) -> HospitalResult<Bed> {
        self.registry.write_with(|state| {
            let bed = state
                .beds
                .get_mut(bed_number)
                .ok_or_else(|| HospitalError::not_found(EntityKind::Bed, bed_number))?;

            if let Some(status) = update.status {
                if status == BedStatus::Occupied {
                    return Err(HospitalError::Validation(
                        "bed status cannot be set to occupied directly; admit a patient instead"
                            .to_string(),
                    ));
                }
                if bed.patient_id.is_some() {
                    return Err(HospitalError::Validation(format!(
                        "bed {bed_number} is occupied; discharge the patient before changing its status"
                    )));
                }
                bed.status = status;
            }
            if let Some(room_number) = update.room_number {
                bed.room_number = room_number;
            }
            if let Some(bed_type) = update.bed_type {
                bed.bed_type = bed_type;
            }
            if let Some(department) = update.department {
                bed.department = department;
            }
            if let Some(equipment) = update.equipment {
                bed.equipment = equipment;
            }

            Ok(bed.clone())
        })
    }

    /// Aggregated bed counts, overall and per bed type.
    pub fn stats(&self) -> BedStats {
        let state = self.registry.read();

        let mut by_type: BTreeMap<_, BedTypeCount> = BTreeMap::new();
        let mut available = 0usize;
        let mut occupied = 0usize;
        let mut maintenance = 0usize;

        for bed in state.beds.values() {
            match bed.status {
                BedStatus::Available => available += 1,
                BedStatus::Occupied => occupied += 1,
                BedStatus::Maintenance => maintenance += 1,
                BedStatus::Reserved => {}
            }

            let entry = by_type.entry(bed.bed_type).or_insert(BedTypeCount {
                bed_type: bed.bed_type,
                count: 0,
                available: 0,
            });
            entry.count += 1;
            if bed.is_available() {
                entry.available += 1;
            }
        }

        BedStats {
            total: state.beds.len(),
            available,
            occupied,
            maintenance,
            by_type: by_type.into_values().collect(),
        }
    }
}

/// Flips a bed to occupied in place. Shared with the admission workflow so
/// both paths keep the occupancy history in step.
pub(crate) fn occupy(bed: &mut Bed, patient_id: Uuid, admitted_at: DateTime<Utc>) {
    bed.status = BedStatus::Occupied;
    bed.patient_id = Some(patient_id);
    bed.occupancy_history.push(OccupancyRecord {
        patient_id,
        admission_date: admitted_at,
        discharge_date: None,
    });
}

/// Frees a bed in place, closing the open occupancy-history record.
pub(crate) fn release(bed: &mut Bed, discharged_at: DateTime<Utc>) {
    bed.status = BedStatus::Available;
    bed.patient_id = None;
    if let Some(record) = bed
        .occupancy_history
        .iter_mut()
        .rev()
        .find(|record| record.discharge_date.is_none())
    {
        record.discharge_date = Some(discharged_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardline_types::BedType;

    fn pool_with(beds: Vec<Bed>) -> BedPool {
        let pool = BedPool::new(Arc::new(Registry::in_memory()));
        for bed in beds {
            pool.insert(bed).expect("insert bed");
        }
        pool
    }

    fn bed(number: &str, department: &str, status: BedStatus) -> Bed {
        let mut bed = Bed::new(number, format!("R{number}"), BedType::General, department);
        bed.status = status;
        bed
    }

    #[test]
    fn find_available_matches_department_exactly() {
        let pool = pool_with(vec![
            bed("B001", "icu", BedStatus::Available),
            bed("B002", "general", BedStatus::Available),
        ]);

        let found = pool.find_available("general").expect("general bed");
        assert_eq!(found.bed_number, "B002");

        // Case-sensitive exact match: "General" is a different department.
        assert!(matches!(
            pool.find_available("General"),
            Err(HospitalError::NoBedAvailable { .. })
        ));
    }

    #[test]
    fn find_available_never_returns_maintenance_or_reserved() {
        let pool = pool_with(vec![
            bed("B001", "general", BedStatus::Maintenance),
            bed("B002", "general", BedStatus::Reserved),
            bed("B003", "general", BedStatus::Occupied),
        ]);

        assert!(matches!(
            pool.find_available("general"),
            Err(HospitalError::NoBedAvailable { .. })
        ));
    }

    #[test]
    fn mark_available_is_idempotent() {
        let pool = pool_with(vec![bed("B001", "general", BedStatus::Available)]);
        let freed = pool.mark_available("B001").expect("first release");
        assert_eq!(freed.status, BedStatus::Available);
        assert_eq!(freed.patient_id, None);

        let again = pool.mark_available("B001").expect("second release");
        assert_eq!(again.status, BedStatus::Available);
    }

    #[test]
    fn mark_occupied_unknown_bed_is_not_found() {
        let pool = pool_with(vec![]);
        let result = pool.mark_occupied("B999", Uuid::new_v4(), Utc::now());
        assert!(matches!(result, Err(HospitalError::NotFound { .. })));
    }

    #[test]
    fn occupy_then_release_closes_history_record() {
        let pool = pool_with(vec![bed("B001", "general", BedStatus::Available)]);
        let patient_id = Uuid::new_v4();

        let occupied = pool
            .mark_occupied("B001", patient_id, Utc::now())
            .expect("occupy");
        assert_eq!(occupied.status, BedStatus::Occupied);
        assert_eq!(occupied.patient_id, Some(patient_id));
        assert_eq!(occupied.occupancy_history.len(), 1);
        assert!(occupied.occupancy_history[0].discharge_date.is_none());

        let freed = pool.mark_available("B001").expect("release");
        assert_eq!(freed.patient_id, None);
        assert!(freed.occupancy_history[0].discharge_date.is_some());
    }

    #[test]
    fn update_rejects_direct_occupied_status() {
        let pool = pool_with(vec![bed("B001", "general", BedStatus::Available)]);
        let result = pool.update(
            "B001",
            BedUpdate {
                status: Some(BedStatus::Occupied),
                ..BedUpdate::default()
            },
        );
        assert!(matches!(result, Err(HospitalError::Validation(_))));

        // Also rejected on a bed that is already occupied.
        pool.mark_occupied("B001", Uuid::new_v4(), Utc::now())
            .expect("occupy");
        let result = pool.update(
            "B001",
            BedUpdate {
                status: Some(BedStatus::Occupied),
                ..BedUpdate::default()
            },
        );
        assert!(matches!(result, Err(HospitalError::Validation(_))));
    }

    #[test]
    fn update_rejects_freeing_an_occupied_bed() {
        let pool = pool_with(vec![bed("B001", "general", BedStatus::Available)]);
        pool.mark_occupied("B001", Uuid::new_v4(), Utc::now())
            .expect("occupy");

        let result = pool.update(
            "B001",
            BedUpdate {
                status: Some(BedStatus::Maintenance),
                ..BedUpdate::default()
            },
        );
        assert!(matches!(result, Err(HospitalError::Validation(_))));
    }

    #[test]
    fn update_moves_unoccupied_bed_to_maintenance() {
        let pool = pool_with(vec![bed("B001", "general", BedStatus::Available)]);
        let updated = pool
            .update(
                "B001",
                BedUpdate {
                    status: Some(BedStatus::Maintenance),
                    department: Some("icu".to_string()),
                    ..BedUpdate::default()
                },
            )
            .expect("update");
        assert_eq!(updated.status, BedStatus::Maintenance);
        assert_eq!(updated.department, "icu");
    }

    #[test]
    fn stats_counts_by_status_and_type() {
        let mut icu = bed("B003", "icu", BedStatus::Available);
        icu.bed_type = BedType::Icu;

        let pool = pool_with(vec![
            bed("B001", "general", BedStatus::Available),
            bed("B002", "general", BedStatus::Maintenance),
            icu,
        ]);
        pool.mark_occupied("B001", Uuid::new_v4(), Utc::now())
            .expect("occupy");

        let stats = pool.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.occupied, 1);
        assert_eq!(stats.maintenance, 1);

        let general = stats
            .by_type
            .iter()
            .find(|c| c.bed_type == BedType::General)
            .expect("general entry");
        assert_eq!(general.count, 2);
        assert_eq!(general.available, 0);

        let icu = stats
            .by_type
            .iter()
            .find(|c| c.bed_type == BedType::Icu)
            .expect("icu entry");
        assert_eq!(icu.count, 1);
        assert_eq!(icu.available, 1);
    }
}
