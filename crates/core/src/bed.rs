//! Bed records.
//!
//! A bed is identified by its human-assigned bed number (e.g. `"B007"`) and
//! carries the facility unit it belongs to plus the reference to the patient
//! currently occupying it. The occupancy invariant is: `status == Occupied`
//! if and only if `patient_id` is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use wardline_types::{BedStatus, BedType};

/// A piece of equipment attached to a bed (e.g. a ventilator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub name: String,
    pub status: String,
}

/// One past or current occupancy of a bed. `discharge_date` is `None` while
/// the occupancy is still active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRecord {
    pub patient_id: Uuid,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    /// Unique, stable, human-assigned identity.
    pub bed_number: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub bed_type: BedType,
    pub status: BedStatus,
    pub department: String,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub occupancy_history: Vec<OccupancyRecord>,
}

impl Bed {
    pub fn new(
        bed_number: impl Into<String>,
        room_number: impl Into<String>,
        bed_type: BedType,
        department: impl Into<String>,
    ) -> Self {
        Self {
            bed_number: bed_number.into(),
            room_number: room_number.into(),
            bed_type,
            status: BedStatus::Available,
            department: department.into(),
            equipment: Vec::new(),
            patient_id: None,
            occupancy_history: Vec::new(),
        }
    }

    /// Whether this bed may be handed out by the admission workflow.
    /// Maintenance and reserved beds are never eligible.
    pub fn is_available(&self) -> bool {
        self.status == BedStatus::Available
    }
}

/// Administrative partial update for a bed.
///
/// A status change to `Occupied` is rejected by the pool; occupancy is only
/// ever established by the admission workflow.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedUpdate {
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub bed_type: Option<BedType>,
    pub status: Option<BedStatus>,
    pub department: Option<String>,
    pub equipment: Option<Vec<Equipment>>,
}
