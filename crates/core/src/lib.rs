//! # Wardline Core
//!
//! Core business logic for the Wardline hospital administration system:
//! bed pool, patient admission workflow, staff account store, statistics
//! and consistency reconciliation, all over a snapshot-backed registry.
//!
//! **No API concerns**: HTTP routing, token issuance and status-code
//! mapping belong in `api-rest`.

pub mod accounts;
pub mod admission;
pub mod bed;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod patient;
pub mod pool;
pub mod reconcile;
pub mod registry;
pub mod staff;
pub mod stats;

pub use accounts::AccountService;
pub use admission::AdmissionService;
pub use bed::{Bed, BedUpdate, Equipment, OccupancyRecord};
pub use bootstrap::{seed_beds, standard_seed, BedSeed};
pub use config::{CoreConfig, DEFAULT_SEED_BED_COUNT};
pub use error::{EntityKind, HospitalError, HospitalResult};
pub use patient::{AdmissionDraft, Billing, ClinicalUpdate, Insurance, Patient};
pub use pool::BedPool;
pub use reconcile::{reconcile, ConsistencyIssue};
pub use registry::Registry;
pub use staff::{NewStaff, StaffMember, StaffUpdate, StaffView};
pub use stats::{BedStats, PatientStats, StaffStats};
