//! Bed pool provisioning.
//!
//! Seeding is an explicit, deterministic bootstrap input: the caller says
//! how many beds to provision and the rotation over types and departments
//! is fixed. No randomness, no ambient clock. Operators can also skip
//! seeding entirely and provision beds through their own tooling.

use crate::registry::Registry;
use crate::{Bed, HospitalResult};
use serde::Deserialize;
use wardline_types::BedType;

/// The seed rotation pairs each bed type with the facility unit that would
/// plausibly own it.
const SEED_ROTATION: &[(BedType, &str)] = &[
    (BedType::General, "general"),
    (BedType::Icu, "icu"),
    (BedType::Emergency, "emergency"),
    (BedType::General, "cardiology"),
    (BedType::StepDown, "neurology"),
    (BedType::General, "orthopedics"),
    (BedType::Pediatric, "pediatrics"),
    (BedType::Isolation, "general"),
    (BedType::Maternity, "general"),
    (BedType::Icu, "icu"),
];

/// One bed to provision at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSeed {
    pub bed_number: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub bed_type: BedType,
    pub department: String,
}

impl From<&BedSeed> for Bed {
    fn from(seed: &BedSeed) -> Self {
        Bed::new(
            seed.bed_number.clone(),
            seed.room_number.clone(),
            seed.bed_type,
            seed.department.clone(),
        )
    }
}

/// Deterministic standard pool: `B001..Bnnn`, rooms from `R101` up, types
/// and departments rotating through [`SEED_ROTATION`].
pub fn standard_seed(count: usize) -> Vec<BedSeed> {
    (0..count)
        .map(|i| {
            let (bed_type, department) = SEED_ROTATION[i % SEED_ROTATION.len()];
            BedSeed {
                bed_number: format!("B{:03}", i + 1),
                room_number: format!("R{}", 101 + i),
                bed_type,
                department: department.to_string(),
            }
        })
        .collect()
}

/// Inserts the given seeds in one transaction, but only when the pool is
/// empty; a populated pool is left untouched. Returns the number of beds
/// inserted.
pub fn seed_beds(registry: &Registry, seeds: &[BedSeed]) -> HospitalResult<usize> {
    registry.write_with(|state| {
        if !state.beds.is_empty() {
            return Ok(0);
        }

        for seed in seeds {
            state.beds.insert(seed.bed_number.clone(), Bed::from(seed));
        }
        tracing::info!(count = seeds.len(), "seeded bed pool");
        Ok(seeds.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_seed_is_deterministic() {
        let a = standard_seed(50);
        let b = standard_seed(50);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a[0].bed_number, "B001");
        assert_eq!(a[0].room_number, "R101");
        assert_eq!(a[1].bed_type, BedType::Icu);
        assert_eq!(a[1].department, "icu");
        // Rotation wraps after ten entries.
        assert_eq!(a[10].bed_type, a[0].bed_type);
    }

    #[test]
    fn seeding_is_skipped_when_pool_is_populated() {
        let registry = Registry::in_memory();
        let inserted = seed_beds(&registry, &standard_seed(10)).expect("first seed");
        assert_eq!(inserted, 10);

        let inserted_again = seed_beds(&registry, &standard_seed(10)).expect("second seed");
        assert_eq!(inserted_again, 0);
        assert_eq!(registry.read().beds.len(), 10);
    }
}
